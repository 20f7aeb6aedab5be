//! Tests for deserializing model types from the web editor's JSON.

use serde_json::json;
use spectral::prelude::*;

use crate::model::types::{Color, FontFamily, HAlign, Model, StyleParameters};


#[test]
fn color_from_string() {
    let color: Color = serde_json::from_value(json!("#FFD700")).unwrap();
    assert_that!(color).is_equal_to(Color(0xff, 0xd7, 0x00));
    let color: Color = serde_json::from_value(json!("tomato")).unwrap();
    assert_that!(color).is_equal_to(Color(255, 99, 71));
}

#[test]
fn color_from_rgb_triple() {
    let color: Color = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_that!(color).is_equal_to(Color(1, 2, 3));
    assert_that!(serde_json::from_value::<Color>(json!([1, 2]))).is_err();
    assert_that!(serde_json::from_value::<Color>(json!([1, 2, 3, 4]))).is_err();
}

#[test]
fn color_rejects_garbage() {
    assert_that!(serde_json::from_value::<Color>(json!("uwotm8"))).is_err();
    assert_that!(serde_json::from_value::<Color>(json!(42))).is_err();
    assert_that!(serde_json::from_value::<Color>(json!("rgba(0,0,0,0.5)"))).is_err();
}

#[test]
fn style_from_full_payload() {
    let style: StyleParameters = serde_json::from_value(json!({
        "promptText": "a cat in a spacesuit",
        "themeColor": "#00FFAA",
        "model": "GPT-4",
        "fontFamily": "serif",
        "fontSize": 48,
        "alignment": "center",
        "textPosition": -20,
        "showBorder": false,
        "showText": true,
        "blurBackground": true,
        "safeZone": true,
        "safeZoneScale": 50,
        "showOriginalOnly": false,
        "gradientIntensity": 80,
    })).unwrap();

    assert_that!(style.prompt_text).is_equal_to("a cat in a spacesuit".to_string());
    assert_that!(style.theme_color).is_equal_to(Color(0x00, 0xff, 0xaa));
    assert_that!(style.model).is_equal_to(Model::Gpt4);
    assert_that!(style.font_family).is_equal_to(FontFamily::Serif);
    assert_that!(style.font_size).is_equal_to(48);
    assert_that!(style.alignment).is_equal_to(HAlign::Center);
    assert_that!(style.text_position).is_equal_to(-20);
    assert!(!style.show_border);
    assert_that!(style.safe_zone_scale).is_equal_to(50);
    assert_that!(style.gradient_intensity).is_equal_to(80);
}

#[test]
fn style_fields_are_optional() {
    let style: StyleParameters = serde_json::from_value(json!({
        "promptText": "hello",
    })).unwrap();
    assert_that!(style.theme_color).is_equal_to(Color(0xff, 0xd7, 0x00));
    assert_that!(style.model).is_equal_to(Model::Gemini);
    assert_that!(style.font_size).is_equal_to(36);
}

#[test]
fn style_rejects_unknown_fields() {
    let result = serde_json::from_value::<StyleParameters>(json!({
        "promptText": "hello",
        "frobnicate": true,
    }));
    assert_that!(result).is_err();
}

#[test]
fn model_none_is_a_valid_choice() {
    let style: StyleParameters =
        serde_json::from_value(json!({"model": "None"})).unwrap();
    assert_that!(style.model).is_equal_to(Model::None);
}
