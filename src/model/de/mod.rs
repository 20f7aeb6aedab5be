//! Custom deserializers for model types.

mod color;

#[cfg(test)]
mod tests;
