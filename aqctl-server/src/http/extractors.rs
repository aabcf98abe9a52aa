//! Custom Axum extractors
//!
//! Query strings are read as raw pairs and the first value of a repeated
//! parameter wins, so `?aq=a&aq=b` means `aq=a`.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{AqKey, ListParams, ListQuery, ValidationError};

/// Raw query pairs in request order
struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    async fn extract<S>(parts: &mut Parts, state: &S) -> Result<Self, ApiError>
    where
        S: Send + Sync,
    {
        let Query(pairs): Query<Vec<(String, String)>> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidQuery {
                    reason: e.body_text(),
                })
            })?;
        Ok(Self(pairs))
    }

    fn first(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// Extract and validate the required `aq` query parameter
pub struct RequiredKey(pub AqKey);

impl<S> FromRequestParts<S> for RequiredKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = QueryPairs::extract(parts, state).await?;
        let key = AqKey::new(pairs.first("aq").as_deref().unwrap_or_default())?;
        Ok(Self(key))
    }
}

/// Extract `/aq/list` parameters, normalized
pub struct ListQueryParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListQueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = QueryPairs::extract(parts, state).await?;
        let params = ListParams {
            aq: pairs.first("aq"),
            limit: pairs.first("limit"),
            offset: pairs.first("offset"),
        };
        Ok(Self(ListQuery::from(params)))
    }
}
