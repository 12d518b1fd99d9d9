//! Demo data the app starts with.
//!
//! Seed partners start unavailable; importing the member directory makes them
//! eligible for matching.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::types::{
    Comment, Connections, Opportunity, OpportunitySource, Partner, PartnerOrigin, Profile,
    ReceivedReferral, SocialLinks,
};

fn social(linkedin: Option<&str>, facebook: Option<&str>, instagram: Option<&str>) -> SocialLinks {
    SocialLinks {
        linkedin: linkedin.map(str::to_string),
        facebook: facebook.map(str::to_string),
        instagram: instagram.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_partner(
    id: &str,
    email: &str,
    name: &str,
    business: &str,
    slogan: &str,
    category: &str,
    image: &str,
    phone: &str,
    website: &str,
    links: SocialLinks,
) -> Partner {
    Partner::new(id, name, business, category)
        .with_email(email)
        .with_slogan(slogan)
        .with_image(image)
        .with_phone(phone)
        .with_website(website)
        .with_social(links)
        .with_available(false)
        .with_origin(PartnerOrigin::Seed)
}

/// The five demo partners.
pub fn partners() -> Vec<Partner> {
    vec![
        seed_partner(
            "1",
            "sarah@example.com",
            "Sarah Chen",
            "Evergreen Financial Planning",
            "Building Wealth, Securing Futures",
            "Financial Advisor",
            "https://images.unsplash.com/photo-1573497019940-1c28c88b4f3e?w=400&q=80",
            "(425) 555-0123",
            "www.evergreenfinancial.com",
            social(
                Some("linkedin.com/in/sarahchen"),
                Some("facebook.com/evergreenfinancial"),
                None,
            ),
        ),
        seed_partner(
            "2",
            "michael@example.com",
            "Michael Rodriguez",
            "Elite Real Estate Group",
            "Your Dream Home Awaits",
            "Real Estate Agent",
            "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=400&q=80",
            "(206) 555-0456",
            "www.eliterealestate.com",
            social(
                Some("linkedin.com/in/michaelrodriguez"),
                Some("facebook.com/eliterealestate"),
                None,
            ),
        ),
        seed_partner(
            "3",
            "jennifer@example.com",
            "Jennifer Park",
            "Bright Smile Dental",
            "Creating Beautiful Smiles Daily",
            "Dentist",
            "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=400&q=80",
            "(425) 555-0789",
            "www.brightsmile.com",
            social(
                None,
                Some("facebook.com/brightsmile"),
                Some("instagram.com/brightsmile"),
            ),
        ),
        seed_partner(
            "4",
            "david@example.com",
            "David Thompson",
            "Thompson Law Firm",
            "Justice Served with Excellence",
            "Business Attorney",
            "https://images.unsplash.com/photo-1556157382-97eda2d62296?w=400&q=80",
            "(206) 555-1234",
            "www.thompsonlaw.com",
            social(
                Some("linkedin.com/in/davidthompson"),
                Some("facebook.com/thompsonlaw"),
                None,
            ),
        ),
        seed_partner(
            "5",
            "lisa@example.com",
            "Lisa Martinez",
            "Digital Marketing Solutions",
            "Growing Your Digital Presence",
            "Digital Marketing",
            "https://images.unsplash.com/photo-1580489944761-15a19d654956?w=400&q=80",
            "(425) 555-5678",
            "www.digitalmktg.com",
            social(
                Some("linkedin.com/in/lisamartinez"),
                None,
                Some("instagram.com/digitalmktg"),
            ),
        ),
    ]
}

/// The three demo opportunities, posted 2h, 4h and 6h before `now`.
pub fn opportunities(now: DateTime<Utc>) -> Vec<Opportunity> {
    vec![
        Opportunity::new(
            "1",
            OpportunitySource::Facebook,
            "Looking for recommendations for a reliable financial advisor in the Bellevue \
             area. Need help with retirement planning and investment strategies. Any \
             suggestions would be greatly appreciated!",
            now - Duration::hours(2),
        )
        .with_engagement(15, 1, 2)
        .with_matched_partner("1")
        .with_comments(vec![Comment::new(
            "1",
            "John Smith",
            "I've been working with someone great, I'll DM you their details!",
            "1h ago",
        )]),
        Opportunity::new(
            "2",
            OpportunitySource::Linkedin,
            "Our startup is growing and we need legal advice for contract negotiations and \
             IP protection. Can anyone recommend a good business attorney in Seattle?",
            now - Duration::hours(4),
        )
        .with_engagement(42, 1, 5)
        .with_matched_partner("4")
        .with_comments(vec![Comment::new(
            "1",
            "Jane Doe",
            "I know a great attorney who specializes in startups.",
            "3h ago",
        )]),
        Opportunity::new(
            "3",
            OpportunitySource::Facebook,
            "Hi neighbors! We're looking to renovate our kitchen and need recommendations \
             for reliable contractors. Budget is flexible for the right team. Any \
             suggestions?",
            now - Duration::hours(6),
        )
        .with_engagement(28, 1, 3)
        .with_comments(vec![Comment::new(
            "1",
            "Mike Wilson",
            "We just had our kitchen done, I'll send you some details!",
            "5h ago",
        )]),
    ]
}

fn march_2024(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap_or_default()
}

/// Historical referrals received from partners.
///
/// Referral "4" points at opportunity "4", which is not in the seed feed. It
/// counts toward the received total but has no post to show.
pub fn received_referrals() -> Vec<ReceivedReferral> {
    vec![
        ReceivedReferral::correlated("1", "2", march_2024(15), "1", "1"),
        ReceivedReferral::correlated("2", "1", march_2024(14), "2", "2"),
        ReceivedReferral::correlated("3", "3", march_2024(13), "3", "3"),
        ReceivedReferral::correlated("4", "5", march_2024(12), "4", "4"),
    ]
}

/// The local user's starting profile.
pub fn profile() -> Profile {
    Profile {
        name: "Andi".to_string(),
        email: "andi@example.com".to_string(),
        phone: String::new(),
        avatar: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&q=80"
            .to_string(),
        business: "Andi's Referral Network".to_string(),
        website: None,
        social: SocialLinks::default(),
        connections: Connections::default(),
    }
}
