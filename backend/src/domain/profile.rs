//! Optional per-user profile metadata.
//!
//! A profile is created lazily (on registration or first login) and there
//! is never more than one per user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Free-form profile owned exclusively by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning user.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    pub bio: String,
    pub phone: String,
    pub gender: String,
    /// Date of birth, if provided.
    pub dob: Option<NaiveDate>,
    /// Avatar image URI.
    pub avatar: String,
    pub location: String,
}

impl Profile {
    /// Empty profile created at registration or first login.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            bio: String::new(),
            phone: String::new(),
            gender: String::new(),
            dob: None,
            avatar: String::new(),
            location: String::new(),
        }
    }

    /// Apply a partial update, leaving absent fields untouched.
    pub fn apply(&mut self, patch: ProfilePatch) {
        let ProfilePatch {
            bio,
            phone,
            gender,
            dob,
            avatar,
            location,
        } = patch;
        if let Some(bio) = bio {
            self.bio = bio;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        if let Some(dob) = dob {
            self.dob = dob;
        }
        if let Some(avatar) = avatar {
            self.avatar = avatar;
        }
        if let Some(location) = location {
            self.location = location;
        }
    }
}

/// Partial profile update. `dob` distinguishes "leave alone" (absent) from
/// "clear" (explicit null).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::double_option"
    )]
    #[schema(value_type = Option<String>, example = "1990-01-31")]
    pub dob: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

mod serde_with {
    //! Double-option handling so `"dob": null` clears the date while an
    //! absent key leaves it untouched.

    pub mod double_option {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            T: Serialize,
            S: Serializer,
        {
            match value {
                Some(inner) => inner.serialize(serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
        where
            T: Deserialize<'de>,
            D: Deserializer<'de>,
        {
            Option::<T>::deserialize(deserializer).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn empty_profile_has_no_content() {
        let profile = Profile::empty(UserId::random());
        assert!(profile.bio.is_empty());
        assert!(profile.dob.is_none());
    }

    #[test]
    fn patch_updates_only_present_fields() {
        let mut profile = Profile::empty(UserId::random());
        profile.bio = "original".to_owned();
        profile.location = "Lisbon".to_owned();

        profile.apply(ProfilePatch {
            location: Some("Porto".to_owned()),
            ..ProfilePatch::default()
        });

        assert_eq!(profile.bio, "original");
        assert_eq!(profile.location, "Porto");
    }

    #[test]
    fn patch_clears_dob_on_explicit_null() {
        let mut profile = Profile::empty(UserId::random());
        profile.dob = NaiveDate::from_ymd_opt(1990, 1, 31);

        let patch: ProfilePatch =
            serde_json::from_value(serde_json::json!({ "dob": null })).expect("valid patch");
        profile.apply(patch);
        assert!(profile.dob.is_none());
    }

    #[test]
    fn absent_dob_key_leaves_date_untouched() {
        let mut profile = Profile::empty(UserId::random());
        profile.dob = NaiveDate::from_ymd_opt(1990, 1, 31);

        let patch: ProfilePatch =
            serde_json::from_value(serde_json::json!({ "bio": "hi" })).expect("valid patch");
        profile.apply(patch);
        assert_eq!(profile.dob, NaiveDate::from_ymd_opt(1990, 1, 31));
    }
}
