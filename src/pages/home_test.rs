use super::*;
use crate::net::types::UserProfile;

fn signed_in(city: Option<&str>) -> AuthState {
    AuthState {
        user: Some(UserProfile {
            city: city.map(str::to_owned),
            ..UserProfile::from_email("asha@example.in")
        }),
        user_signed_in: true,
        admin_signed_in: false,
    }
}

#[test]
fn news_city_prefers_profile_city() {
    let config = AppConfig::default();
    assert_eq!(news_city(&signed_in(Some("Udaipur")), &config), "Udaipur");
}

#[test]
fn news_city_falls_back_to_configured_default() {
    let config = AppConfig {
        default_city: "Kota".to_owned(),
        ..AppConfig::default()
    };
    assert_eq!(news_city(&AuthState::default(), &config), "Kota");
    assert_eq!(news_city(&signed_in(Some("  ")), &config), "Kota");
    assert_eq!(news_city(&signed_in(None), &config), "Kota");
}
