//! End-to-end referral workflow tests

use andi_core::{
    seed, Comment, EngineConfig, EngineError, FeedFilter, Opportunity, OpportunityLedger,
    OpportunitySource, Partner, PartnerDirectory, ReferralSession, StatsAggregator, LOCAL_AUTHOR,
    MAX_PARTNERS,
};
use chrono::{DateTime, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn imported_session() -> ReferralSession {
    let mut session = ReferralSession::seeded(EngineConfig::default(), now()).unwrap();
    session.import_members(seed::partners()).unwrap();
    session
}

/// Opportunity "1" with eight comments, pre-matched to partner "1".
fn busy_opportunity() -> Opportunity {
    let comments = (1..=8)
        .map(|i| Comment::new(i.to_string(), format!("Neighbor {i}"), "Following", "1h ago"))
        .collect();
    Opportunity::new(
        "1",
        OpportunitySource::Facebook,
        "Looking for a financial advisor",
        now(),
    )
    .with_matched_partner("1")
    .with_engagement(15, 8, 2)
    .with_comments(comments)
}

#[test]
fn test_capacity_never_exceeded() {
    let mut directory = PartnerDirectory::new();
    for i in 0..(MAX_PARTNERS * 2) {
        let _ = directory.add(Partner::new(i.to_string(), "P", "B", "C"));
        assert!(directory.used_slots() <= MAX_PARTNERS);
    }

    let oversized: Vec<Partner> = (0..MAX_PARTNERS + 3)
        .map(|i| Partner::new(format!("x{i}"), "P", "B", "C"))
        .collect();
    assert!(directory.replace_all(oversized).is_err());
    assert_eq!(directory.used_slots(), MAX_PARTNERS);
    assert_eq!(directory.all()[0].id, "0");
}

#[test]
fn test_eleventh_partner_is_rejected() {
    let mut directory = PartnerDirectory::new();
    for i in 1..=10 {
        directory
            .add(Partner::new(i.to_string(), "P", "B", "C"))
            .unwrap();
    }

    let result = directory.add(Partner::new("11", "P", "B", "C"));

    assert_eq!(result, Err(EngineError::CapacityExceeded { max: 10 }));
    assert_eq!(directory.used_slots(), 10);
    assert!(directory.get_by_id("11").is_none());
}

#[test]
fn test_referral_comment_closes_opportunity() {
    let mut ledger = OpportunityLedger::with_opportunities(vec![
        busy_opportunity(),
        Opportunity::new("2", OpportunitySource::Linkedin, "Need an attorney", now()),
    ]);
    let stats = StatsAggregator::new(LOCAL_AUTHOR);
    assert_eq!(stats.open_opportunities(&ledger), 2);

    ledger
        .add_comment("1", Comment::referral("9", "You", "msg", "now"))
        .unwrap();

    let opportunity = ledger.get_by_id("1").unwrap();
    assert_eq!(opportunity.comments, 9);
    assert_eq!(opportunity.comments_list.len(), 9);
    assert!(stats.has_referral(&ledger, "1"));
    assert_eq!(stats.open_opportunities(&ledger), 1);
}

#[test]
fn test_comment_count_tracks_thread_length() {
    let mut ledger = OpportunityLedger::with_opportunities(vec![busy_opportunity()]);
    for i in 0..5 {
        let before = ledger.get_by_id("1").unwrap().comments_list.len();
        let comment = if i % 2 == 0 {
            Comment::new(format!("c{i}"), LOCAL_AUTHOR, "Following", "now")
        } else {
            Comment::new(format!("c{i}"), "Neighbor", "Me too", "now")
        };
        ledger.add_comment("1", comment).unwrap();

        let opportunity = ledger.get_by_id("1").unwrap();
        assert_eq!(opportunity.comments_list.len(), before + 1);
        assert_eq!(opportunity.comments as usize, opportunity.comments_list.len());
    }

    // Plain local comments never count as referrals
    assert!(!StatsAggregator::new(LOCAL_AUTHOR).has_referral(&ledger, "1"));
}

#[test]
fn test_given_counter_matches_scan_after_every_post() {
    let mut session = imported_session();
    let ids: Vec<String> = session.ledger().all().iter().map(|o| o.id.clone()).collect();

    for id in &ids {
        session.post_referral(id, None, None, now()).unwrap();
        assert_eq!(
            session.referrals_given(),
            session.stats().scan_referrals_given(session.ledger())
        );
    }

    assert_eq!(session.referrals_given(), ids.len());
    assert_eq!(session.open_opportunities(), 0);
    assert!(session.dashboard_feed().is_empty());
    assert_eq!(session.given_referrals().len(), ids.len());
}

#[test]
fn test_unavailable_prematch_uses_first_available() {
    let mut session = imported_session();
    let mut sarah = session.directory().get_by_id("1").unwrap().clone();
    sarah.available = Some(false);
    session.directory_mut().update(sarah).unwrap();

    let preview = session.preview("1", None).unwrap();

    assert_eq!(preview.partner.unwrap().id, "2");
    assert!(!preview.pre_matched);
}

#[test]
fn test_removed_partner_reference_dangles_safely() {
    let mut session = imported_session();
    session.directory_mut().remove("1").unwrap();

    let preview = session.preview("1", None).unwrap();
    assert_eq!(preview.partner.unwrap().id, "2");

    // Received referral "2" points at the removed partner and drops out of the join
    let views = session.received_views();
    assert!(views.iter().all(|v| v.referral.partner_id != "1"));
    assert_eq!(session.referrals_received(), 4);
}

#[test]
fn test_permissive_noops_leave_state_untouched() {
    let mut session = imported_session();
    let before = session.ledger().all().to_vec();

    let err = session
        .add_comment("missing", Comment::new("x", LOCAL_AUTHOR, "hi", "now"))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(session.ledger().all(), before.as_slice());

    assert!(session.directory_mut().remove("missing").is_err());
    assert_eq!(session.directory().used_slots(), 5);
}

#[test]
fn test_review_navigation_after_post() {
    let mut session = imported_session();
    let comment = session.post_referral("2", None, None, now()).unwrap();

    assert_eq!(session.ledger().draft_message(), Some(comment.content.as_str()));
    assert_eq!(session.next_opportunity("2").unwrap().id, "3");
    assert!(session.next_opportunity("3").is_none());
}

#[test]
fn test_source_filtered_feed() {
    let session = imported_session();
    let filter = FeedFilter::default().with_source(OpportunitySource::Facebook);
    let ids: Vec<&str> = session.open_feed(&filter).iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}
