use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct PluginMetaDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Loaded plugins plus the ids of registrations whose constructor failed.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct PluginCatalogDto {
    pub plugins: Vec<PluginMetaDto>,
    pub failed: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct NavPlacementDto {
    pub section: String,
    pub order: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct DashboardFragmentDto {
    pub id: String,
    pub name: String,
    pub html: String,
    pub script: String,
    pub nav: Option<NavPlacementDto>,
}
