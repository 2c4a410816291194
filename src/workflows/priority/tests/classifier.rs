use super::common::{client, client_aged_months, fixed_now};
use crate::workflows::priority::classifier::{classify, AgeThresholds, PriorityTier};

fn thresholds() -> AgeThresholds {
    AgeThresholds::at(fixed_now())
}

#[test]
fn plain_client_falls_to_added_date_tier() {
    let mut plain = client_aged_months(101, 48);
    plain.primary_insurance = Some("Aetna".to_string());

    let assessment = classify(&plain, thresholds());

    assert_eq!(assessment.tier, PriorityTier::AddedDate);
    assert_eq!(assessment.reason, "Added date");
    assert_eq!(assessment.secondary_key, plain.added_date);
    assert!(!assessment.is_priority());
}

#[test]
fn babynet_insurance_in_window_is_aging_out_tier() {
    // 2 years 8 months old with a BabyNet primary insurance string.
    let mut client = client_aged_months(102, 32);
    client.primary_insurance = Some("BabyNet".to_string());

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::BabyNetAgingOut);
    assert_eq!(assessment.reason, "BabyNet above 2:6");
    assert_eq!(assessment.secondary_key, client.dob);
}

#[test]
fn babynet_substring_match_is_case_sensitive() {
    let mut client = client_aged_months(103, 32);
    client.primary_insurance = Some("babynet waiver".to_string());

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::AddedDate);
}

#[test]
fn manual_babynet_flag_counts_without_insurance_string() {
    let mut client = client_aged_months(104, 32);
    client.baby_net = true;

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::BabyNetAgingOut);
}

#[test]
fn babynet_and_manual_priority_takes_top_tier() {
    let mut client = client_aged_months(105, 32);
    client.secondary_insurance = Some("SC BabyNet".to_string());
    client.high_priority = true;

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::BabyNetAndHighPriority);
    assert_eq!(assessment.reason, "BabyNet and High Priority");
    assert_eq!(assessment.tier.ordinal(), 0);
}

#[test]
fn manual_priority_alone_is_high_priority_tier() {
    let mut client = client_aged_months(106, 48);
    client.high_priority = true;

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::HighPriority);
    assert_eq!(assessment.reason, "High Priority");
    assert_eq!(assessment.secondary_key, client.added_date);
}

#[test]
fn babynet_below_window_is_not_prioritized() {
    // Two years old: BabyNet but not yet near aging out.
    let mut client = client_aged_months(107, 24);
    client.primary_insurance = Some("BabyNet".to_string());

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::AddedDate);
}

#[test]
fn window_boundaries_are_inclusive_on_the_urgent_side() {
    // Exactly 2:6 today: first day inside the window.
    let mut at_entry = client_aged_months(108, 30);
    at_entry.baby_net = true;
    assert_eq!(
        classify(&at_entry, thresholds()).tier,
        PriorityTier::BabyNetAgingOut
    );

    // Third birthday today: aged out, window edge is exclusive.
    let mut at_exit = client_aged_months(109, 36);
    at_exit.baby_net = true;
    assert_eq!(classify(&at_exit, thresholds()).tier, PriorityTier::AddedDate);
}

#[test]
fn missing_dob_never_enters_the_window() {
    let mut client = client(110, "No", "Dob");
    client.baby_net = true;

    let assessment = classify(&client, thresholds());

    assert_eq!(assessment.tier, PriorityTier::AddedDate);
}

#[test]
fn note_only_placeholder_reports_note_only_reason() {
    let shell = client(20_431, "Note", "Only");

    let assessment = classify(&shell, thresholds());

    assert_eq!(assessment.tier, PriorityTier::AddedDate);
    assert_eq!(assessment.reason, "Note only");
}
