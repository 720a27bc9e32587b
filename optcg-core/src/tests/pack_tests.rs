use super::*;

#[test]
fn three_part_title_is_split_and_trimmed() {
    let pack = Pack::from_title("Starter Deck - Straw Hat Crew - [ST01]", "556104").unwrap();
    assert_eq!(
        pack,
        Pack {
            series: "556104".to_string(),
            prefix: "Starter Deck".to_string(),
            name: "Straw Hat Crew".to_string(),
            code: "ST01".to_string(),
        }
    );
}

#[test]
fn extra_whitespace_is_trimmed_from_every_group() {
    let pack = Pack::from_title("  Prefix 1   -   Starter Deck  -  [ SD01 ] ", "1").unwrap();
    assert_eq!(pack.prefix, "Prefix 1");
    assert_eq!(pack.name, "Starter Deck");
    assert_eq!(pack.code, "SD01");
}

#[test]
fn site_style_dash_wrapped_names_parse() {
    let pack = Pack::from_title("BOOSTER PACK -ROMANCE DAWN- [OP-01]", "556101").unwrap();
    assert_eq!(pack.prefix, "BOOSTER PACK");
    assert_eq!(pack.name, "ROMANCE DAWN");
    assert_eq!(pack.code, "OP-01");
}

#[test]
fn embedded_tags_are_stripped_before_matching() {
    let pack = Pack::from_title(
        "BOOSTER PACK <br class=\"spInline\">-PARAMOUNT WAR- [OP-02]",
        "556102",
    )
    .unwrap();
    assert_eq!(pack.prefix, "BOOSTER PACK");
    assert_eq!(pack.name, "PARAMOUNT WAR");
    assert_eq!(pack.code, "OP-02");
}

#[test]
fn title_without_code_falls_back_to_sentinel() {
    let pack = Pack::from_title("  Promotion card  ", "556901").unwrap();
    assert_eq!(pack.prefix, NONE_SENTINEL);
    assert_eq!(pack.code, NONE_SENTINEL);
    assert_eq!(pack.name, "Promotion card");
    assert!(!pack.is_usable());
}

#[test]
fn two_field_title_keeps_whole_title_as_name() {
    let pack = Pack::from_title("Other Product - Limited", "556902").unwrap();
    assert_eq!(pack.name, "Other Product - Limited");
    assert_eq!(pack.code, "None");
}

#[test]
fn empty_title_is_invalid() {
    assert_eq!(
        Pack::from_title("   ", "1"),
        Err(ModelError::InvalidTitleFormat("   ".to_string()))
    );
    assert!(Pack::from_title("<br>", "1").is_err());
}

#[test]
fn pack_without_series_is_unusable() {
    let pack = Pack::from_title("Starter Deck - Straw Hat Crew - [ST01]", "").unwrap();
    assert!(!pack.is_usable());

    let pack = Pack::from_title("Starter Deck - Straw Hat Crew - [ST01]", "556104").unwrap();
    assert!(pack.is_usable());
}
