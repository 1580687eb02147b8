//! `/rest/workspaces/{workspace}/featuretypes/{featuretype}`: read and
//! update the descriptive metadata the collections listing publishes.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::converter::PersisterMessageConverter;
use super::persister::Persister;
use super::wrapper::{BufferedMessage, RestController, RestInputWrapper};
use crate::catalog::{Catalog, FeatureTypeInfo};
use crate::error::{AppError, AppResult};

/// Root element / wrapper key of feature type payloads
pub const FEATURE_TYPE_ALIAS: &str = "featureType";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordList {
    #[serde(default)]
    pub string: Vec<String>,
}

/// Feature type payload; absent fields are left untouched on update.
/// Unknown fields, including a root other than `featureType`, are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureTypeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "abstract", alias = "description")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<KeywordList>,
}

#[derive(Debug, Serialize)]
pub struct FeatureTypeDocument {
    pub name: String,
    pub workspace: String,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub keywords: KeywordList,
}

impl From<FeatureTypeInfo> for FeatureTypeDocument {
    fn from(ft: FeatureTypeInfo) -> Self {
        Self {
            workspace: ft.store.workspace,
            store: ft.store.name,
            name: ft.name,
            title: ft.title,
            description: ft.description,
            keywords: KeywordList { string: ft.keywords },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeatureTypePath {
    pub workspace: String,
    pub featuretype: String,
}

pub struct FeatureTypeController {
    catalog: Arc<Catalog>,
}

impl RestController for FeatureTypeController {
    fn configure_persister(&self, persister: &mut Persister, _converter: &PersisterMessageConverter) {
        persister.set_root_alias(FEATURE_TYPE_ALIAS);
    }
}

impl FeatureTypeController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    async fn lookup(&self, workspace: &str, name: &str) -> AppResult<FeatureTypeInfo> {
        self.catalog
            .feature_type(workspace, name)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Feature type not found: {}:{}", workspace, name))
            })
    }

    pub async fn apply(&self, workspace: &str, name: &str, update: FeatureTypeUpdate) -> AppResult<()> {
        let mut feature_type = self.lookup(workspace, name).await?;

        if let Some(new_name) = &update.name {
            if new_name != name {
                return Err(AppError::BadRequest(format!(
                    "Renaming feature type {} to {} is not supported",
                    name, new_name
                )));
            }
        }

        if let Some(title) = update.title {
            feature_type.title = Some(title);
        }
        if let Some(description) = update.description {
            feature_type.description = Some(description);
        }
        if let Some(keywords) = update.keywords {
            feature_type.keywords = keywords.string;
        }

        self.catalog.save_feature_type(feature_type).await
    }
}

#[derive(Debug, Serialize)]
pub struct FeatureTypeEnvelope {
    #[serde(rename = "featureType")]
    pub feature_type: FeatureTypeDocument,
}

pub async fn get_feature_type(
    State(controller): State<Arc<FeatureTypeController>>,
    Path(path): Path<FeatureTypePath>,
) -> AppResult<Json<FeatureTypeEnvelope>> {
    let feature_type = controller.lookup(&path.workspace, &path.featuretype).await?;

    Ok(Json(FeatureTypeEnvelope {
        feature_type: feature_type.into(),
    }))
}

pub async fn update_feature_type(
    State(controller): State<Arc<FeatureTypeController>>,
    Path(path): Path<FeatureTypePath>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    let input = RestInputWrapper::new(BufferedMessage::new(headers, body), &*controller);
    let converter = PersisterMessageConverter::for_message(&input)?;
    let update: FeatureTypeUpdate = converter.read(&input)?;

    controller
        .apply(&path.workspace, &path.featuretype, update)
        .await?;

    Ok(StatusCode::OK)
}

pub fn routes(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route(
            "/rest/workspaces/{workspace}/featuretypes/{featuretype}",
            get(get_feature_type).put(update_feature_type),
        )
        .with_state(Arc::new(FeatureTypeController::new(catalog)))
}
