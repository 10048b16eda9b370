use serde::{Deserialize, Deserializer};

use crate::{auth::Role, db::dao::Pagination, error::AppError};

/// `?limit&offset&search` shared by every collection route.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub search: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Pagination {
        Pagination::new(
            self.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
            self.offset.unwrap_or(0),
        )
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

/// `PageQuery` plus a role filter. Not flattened: numbers do not parse
/// through `#[serde(flatten)]` in query strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UsersQuery {
    pub roles: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub search: Option<String>,
}

impl UsersQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery {
            limit: self.limit,
            offset: self.offset,
            search: self.search.clone(),
        }
    }

    /// `roles=admin,superadmin`; blank entries are ignored.
    pub fn roles(&self) -> Result<Vec<Role>, AppError> {
        let Some(raw) = self.roles.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| {
                Role::try_from(tag).map_err(|_| {
                    AppError::bad_request(format!(
                        "Unknown role '{tag}', expected one of: user, admin, superadmin"
                    ))
                })
            })
            .collect()
    }
}

/// Keeps "absent" and "explicit null" apart for PATCH bodies: a missing
/// field stays `None`, `null` becomes `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::{PageQuery, UsersQuery, nullable};
    use crate::{auth::Role, db::dao::Pagination};

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        units: Option<Option<String>>,
    }

    #[test]
    fn nullable_distinguishes_missing_from_null() {
        let missing: Patch = serde_json::from_str("{}").expect("parse");
        let null: Patch = serde_json::from_str(r#"{"units":null}"#).expect("parse");
        let set: Patch = serde_json::from_str(r#"{"units":"kg"}"#).expect("parse");

        assert_eq!(missing.units, None);
        assert_eq!(null.units, Some(None));
        assert_eq!(set.units, Some(Some("kg".to_string())));
    }

    #[test]
    fn page_defaults_to_first_ten() {
        assert_eq!(PageQuery::default().page(), Pagination::new(10, 0));
    }

    #[test]
    fn roles_parse_comma_separated_tags() {
        let query = UsersQuery {
            roles: Some("admin, superadmin,".to_string()),
            ..Default::default()
        };
        assert_eq!(query.roles().ok(), Some(vec![Role::Admin, Role::Superadmin]));

        let query = UsersQuery {
            roles: Some("admin,owner".to_string()),
            ..Default::default()
        };
        assert!(query.roles().is_err());
    }
}
