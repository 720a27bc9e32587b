use super::*;

#[test]
fn rarity_codes_round_trip() {
    for &rarity in ALL_RARITIES {
        let parsed: Rarity = rarity.code().parse().unwrap();
        assert_eq!(parsed, rarity);
    }
}

#[test]
fn rarity_parsing_is_case_insensitive_and_trims() {
    assert_eq!(" sec ".parse::<Rarity>(), Ok(Rarity::SecretRare));
    assert_eq!("sp card".parse::<Rarity>(), Ok(Rarity::Special));
}

#[test]
fn unknown_rarity_is_rejected() {
    assert_eq!(
        "UR".parse::<Rarity>(),
        Err(ModelError::UnknownRarity("UR".to_string()))
    );
}

#[test]
fn category_parsing() {
    assert_eq!("LEADER".parse::<Category>(), Ok(Category::Leader));
    assert_eq!("Character".parse::<Category>(), Ok(Category::Character));
    assert!("CHAR".parse::<Category>().is_err());
    for &category in ALL_CATEGORIES {
        assert_eq!(category.to_string().parse::<Category>(), Ok(category));
    }
}

#[test]
fn color_parsing() {
    assert_eq!("red".parse::<Color>(), Ok(Color::Red));
    assert_eq!("Yellow".parse::<Color>(), Ok(Color::Yellow));
    assert!("Orange".parse::<Color>().is_err());
    for &color in ALL_COLORS {
        assert_eq!(color.to_string().parse::<Color>(), Ok(color));
    }
}

#[test]
fn card_colors_keep_unknown_tokens() {
    assert_eq!(CardColor::parse(" green "), CardColor::Known(Color::Green));
    let orange = CardColor::parse("Orange");
    assert_eq!(orange, CardColor::Raw("Orange".to_string()));
    assert!(!orange.is_known());
    assert_eq!(orange.to_string(), "Orange");
    assert_eq!(CardColor::from(Color::Blue).as_str(), "Blue");
    assert_eq!(
        serde_json::to_string(&vec![CardColor::Known(Color::Red), orange]).unwrap(),
        r#"["Red","Orange"]"#
    );
}

#[test]
fn attribute_known_tokens() {
    assert_eq!(Attribute::parse("Slash"), Attribute::Known(AttributeKind::Slash));
    assert_eq!(Attribute::parse(" wisdom "), Attribute::Known(AttributeKind::Wisdom));
    assert_eq!(Attribute::parse("?"), Attribute::Known(AttributeKind::Unknown));
}

#[test]
fn attribute_unknown_token_is_kept_raw() {
    let attr = Attribute::parse("Laser");
    assert_eq!(attr, Attribute::Raw("Laser".to_string()));
    assert!(!attr.is_known());
    assert_eq!(attr.to_string(), "Laser");
}

#[test]
fn enums_serialize_as_their_string_values() {
    assert_eq!(serde_json::to_string(&Rarity::Special).unwrap(), "\"SP CARD\"");
    assert_eq!(serde_json::to_string(&Rarity::Leader).unwrap(), "\"L\"");
    assert_eq!(serde_json::to_string(&Category::Don).unwrap(), "\"DON\"");
    assert_eq!(serde_json::to_string(&Color::Purple).unwrap(), "\"Purple\"");
    assert_eq!(
        serde_json::to_string(&vec![
            Attribute::Known(AttributeKind::Unknown),
            Attribute::Raw("Laser".to_string()),
        ])
        .unwrap(),
        "[\"?\",\"Laser\"]"
    );
}

#[test]
fn card_json_uses_field_names_in_declaration_order() {
    let card = Card::new("OP01-001", "OP01-001", Rarity::Leader, Category::Leader)
        .with_name("Monkey D. Luffy");
    let json = serde_json::to_string(&card).unwrap();
    let id_pos = json.find("\"id\"").unwrap();
    let code_pos = json.find("\"code\"").unwrap();
    let trigger_pos = json.find("\"trigger\"").unwrap();
    assert!(id_pos < code_pos && code_pos < trigger_pos);
    assert!(json.contains("\"image_url\":\"\""));
    assert!(json.contains("\"power\":null"));
}
