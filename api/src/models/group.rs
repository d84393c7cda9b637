use pollbuddy_core::db::{Group, User};
use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=30;

fn check_length(field: &str, value: &str) -> Result<(), ErrorResponse> {
    if NAME_LENGTH.contains(&value.chars().count()) {
        Ok(())
    } else {
        Err(ErrorResponse::bad_request(format!(
            "{field} must be between {} and {} characters",
            NAME_LENGTH.start(),
            NAME_LENGTH.end()
        )))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGroupModel {
    pub name:        String,
    pub description: String
}

impl CreateGroupModel {
    pub fn validate(&self) -> Result<(), ErrorResponse> {
        check_length("name", &self.name)?;
        check_length("description", &self.description)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditGroupModel {
    pub name:        Option<String>,
    pub description: Option<String>
}

impl EditGroupModel {
    pub fn validate(&self) -> Result<(), ErrorResponse> {
        if let Some(name) = &self.name {
            check_length("name", name)?;
        }

        if let Some(description) = &self.description {
            check_length("description", description)?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedModel {
    pub id: String
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupModel {
    pub name:        String,
    pub description: String,
    pub is_member:   bool,
    pub is_admin:    bool
}

impl GroupModel {
    pub fn from_group(group: Group, is_member: bool, is_admin: bool) -> Self {
        Self {
            name: group.name,
            description: group.description,
            is_member,
            is_admin
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUserModel {
    pub id:        String,
    pub user_name: String
}

impl GroupUserModel {
    pub fn from_user(user: User) -> Self {
        Self {
            id:        user.id.to_hex(),
            user_name: user.user_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_both_fields_in_range() {
        let valid = CreateGroupModel {
            name:        "abc".to_string(),
            description: "x".repeat(30)
        };
        assert!(valid.validate().is_ok());

        let short = CreateGroupModel {
            name:        "ab".to_string(),
            description: "Fine description".to_string()
        };
        assert_eq!(short.validate().unwrap_err().status, 400);

        let long = CreateGroupModel {
            name:        "Fine name".to_string(),
            description: "x".repeat(31)
        };
        assert_eq!(long.validate().unwrap_err().status, 400);

        assert!(serde_json::from_str::<CreateGroupModel>(r#"{"name": "abc"}"#)
            .is_err());
    }

    #[test]
    fn edit_fields_are_optional() {
        assert!(EditGroupModel::default().validate().is_ok());

        let renamed = EditGroupModel {
            name: Some("New name".to_string()),
            ..Default::default()
        };
        assert!(renamed.validate().is_ok());

        let invalid = EditGroupModel {
            description: Some("no".to_string()),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check_length("name", "ééé").is_ok());
        assert!(check_length("name", &"é".repeat(30)).is_ok());
        assert!(check_length("name", &"é".repeat(31)).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<EditGroupModel>(
            r#"{"name": "abc", "admins": []}"#
        )
        .is_err());
    }

    #[test]
    fn group_model_uses_camel_case() {
        let model = GroupModel {
            name:        "Group".to_string(),
            description: "Described".to_string(),
            is_member:   true,
            is_admin:    false
        };

        assert_eq!(
            serde_json::to_value(model).unwrap(),
            serde_json::json!({
                "name": "Group",
                "description": "Described",
                "isMember": true,
                "isAdmin": false
            })
        );
    }
}
