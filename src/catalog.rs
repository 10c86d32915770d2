//! Catalog filtering.
//!
//! The displayed product list is a pure function of the full listing, the
//! search text, the category selection and the college selection. It is cheap
//! enough to recompute on every keystroke.

use crate::domain::{Profile, ProductListing, UserSummary};

/// The selector value meaning "no restriction".
pub const ALL: &str = "all";

/// A category or college selector: everything, or exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parses a selector value; `"all"` is the sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Selection::All
        } else {
            Selection::Only(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::parse(raw)
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Listings whose title or description contains `query` (ignoring case), in
/// the category selected by id and from a seller at the college selected by
/// name. Input order is kept.
pub fn filter_products<'a>(
    listings: &'a [ProductListing],
    query: &str,
    category: &Selection,
    college: &Selection,
) -> Vec<&'a ProductListing> {
    let needle = query.to_lowercase();
    listings
        .iter()
        .filter(|listing| {
            needle.is_empty()
                || contains_ignore_case(&listing.product.title, &needle)
                || contains_ignore_case(&listing.product.description, &needle)
        })
        .filter(|listing| category.matches(Some(&listing.product.category_id)))
        .filter(|listing| college.matches(listing.seller_college()))
        .collect()
}

/// Admin user search over name, email and college.
pub fn filter_users<'a>(users: &'a [UserSummary], query: &str) -> Vec<&'a UserSummary> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| {
            let profile = &user.profile;
            needle.is_empty()
                || contains_ignore_case(&profile.full_name, &needle)
                || contains_ignore_case(&profile.email, &needle)
                || profile.college.as_deref().is_some_and(|c| contains_ignore_case(c, &needle))
        })
        .collect()
}

/// The browse page's filter inputs.
///
/// The college selector starts at `all` and is seeded once from the viewer's
/// own college when their profile first loads, unless they already picked a
/// college themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: Selection,
    pub college: Selection,
    college_settled: bool,
}

impl FilterState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn select_category(&mut self, raw: &str) {
        self.category = Selection::parse(raw);
    }

    pub fn select_college(&mut self, raw: &str) {
        self.college = Selection::parse(raw);
        self.college_settled = true;
    }

    /// Seeds the college selector from the profile. Returns whether it changed.
    pub fn seed_from_profile(&mut self, profile: &Profile) -> bool {
        if self.college_settled {
            return false;
        }
        let Some(college) = profile.college.as_deref().filter(|c| !c.is_empty()) else {
            return false;
        };
        self.college = Selection::Only(college.to_string());
        self.college_settled = true;
        true
    }

    pub fn apply<'a>(&self, listings: &'a [ProductListing]) -> Vec<&'a ProductListing> {
        filter_products(listings, &self.query, &self.category, &self.college)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactCard, Product, ProductStatus};
    use chrono::Utc;

    fn listing(
        id: &str,
        title: &str,
        description: &str,
        category_id: &str,
        college: Option<&str>,
    ) -> ProductListing {
        ProductListing {
            product: Product {
                id: id.into(),
                title: title.into(),
                description: description.into(),
                price: 500.0,
                image_urls: vec![],
                seller_id: "user_1".into(),
                category_id: category_id.into(),
                status: ProductStatus::Active,
                created_at: Utc::now(),
            },
            seller: Some(ContactCard {
                full_name: "Asha Rao".into(),
                mobile_number: "9876543210".into(),
                college: college.map(str::to_string),
            }),
            category_name: None,
        }
    }

    fn sample() -> Vec<ProductListing> {
        vec![
            listing("1", "Bike", "Red hybrid bicycle", "vehicles", Some("IIT Madras")),
            listing("2", "Desk", "Study desk with drawer", "furniture", Some("NIT Trichy")),
            listing("3", "Calculus textbook", "Thomas, 12th edition", "books", Some("IIT Madras")),
            listing("4", "Desk lamp", "LED, warm light", "furniture", None),
        ]
    }

    fn ids(result: &[&ProductListing]) -> Vec<String> {
        result.iter().map(|l| l.product.id.clone()).collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let all = sample();
        let result = filter_products(&all, "", &Selection::All, &Selection::All);
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_query_matches_title_or_description_ignoring_case() {
        let all = sample();
        let any = Selection::All;
        assert_eq!(ids(&filter_products(&all, "desk", &any, &any)), vec!["2", "4"]);
        assert_eq!(ids(&filter_products(&all, "THOMAS", &any, &any)), vec!["3"]);
        assert_eq!(ids(&filter_products(&all, "bik", &any, &any)), vec!["1"]);
        assert!(filter_products(&all, "car", &any, &any).is_empty());
    }

    #[test]
    fn test_category_and_college_selections_combine() {
        let all = sample();
        let furniture = Selection::parse("furniture");
        let nit = Selection::parse("NIT Trichy");
        assert_eq!(ids(&filter_products(&all, "", &furniture, &Selection::All)), vec!["2", "4"]);
        assert_eq!(ids(&filter_products(&all, "", &furniture, &nit)), vec!["2"]);
        assert_eq!(ids(&filter_products(&all, "lamp", &furniture, &nit)), Vec::<String>::new());
    }

    #[test]
    fn test_unknown_selection_yields_nothing() {
        let all = sample();
        let electronics = Selection::parse("electronics");
        let nowhere = Selection::parse("Nowhere U");
        assert!(filter_products(&all, "", &electronics, &Selection::All).is_empty());
        assert!(filter_products(&all, "", &Selection::All, &nowhere).is_empty());
    }

    #[test]
    fn test_result_is_an_ordered_subsequence() {
        let all = sample();
        for query in ["", "e", "desk", "x"] {
            for category in ["all", "furniture", "books"] {
                for college in ["all", "IIT Madras"] {
                    let result = filter_products(&all, query, &category.into(), &college.into());
                    let positions: Vec<usize> = result
                        .iter()
                        .map(|r| all.iter().position(|l| l.product.id == r.product.id).unwrap())
                        .collect();
                    assert!(positions.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }

    #[test]
    fn test_college_seeded_once_from_profile() {
        let mut profile = Profile {
            id: "user_1".into(),
            full_name: "Asha Rao".into(),
            mobile_number: "9876543210".into(),
            college: Some("IIT Madras".into()),
            email: "asha@example.com".into(),
        };

        let mut state = FilterState::default();
        assert_eq!(state.college, Selection::All);
        assert!(state.seed_from_profile(&profile));
        assert_eq!(state.college.as_str(), "IIT Madras");

        state.select_college("all");
        profile.college = Some("NIT Trichy".into());
        assert!(!state.seed_from_profile(&profile));
        assert_eq!(state.college, Selection::All);
    }

    #[test]
    fn test_explicit_choice_before_profile_load_wins() {
        let profile = Profile {
            id: "user_1".into(),
            full_name: "Asha Rao".into(),
            mobile_number: "9876543210".into(),
            college: Some("IIT Madras".into()),
            email: "asha@example.com".into(),
        };
        let mut state = FilterState::default();
        state.select_college("NIT Trichy");
        assert!(!state.seed_from_profile(&profile));
        assert_eq!(state.apply(&sample()).len(), 1);
    }

    #[test]
    fn test_user_search() {
        let make = |name: &str, email: &str, college: Option<&str>| UserSummary {
            profile: Profile {
                id: name.into(),
                full_name: name.into(),
                mobile_number: "1".into(),
                college: college.map(str::to_string),
                email: email.into(),
            },
            is_admin: false,
        };
        let users = vec![
            make("Asha Rao", "asha@example.com", Some("IIT Madras")),
            make("Vikram Iyer", "vik@example.com", None),
        ];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "madras")[0].profile.full_name, "Asha Rao");
        assert_eq!(filter_users(&users, "VIK")[0].profile.full_name, "Vikram Iyer");
        assert!(filter_users(&users, "trichy").is_empty());
    }
}
