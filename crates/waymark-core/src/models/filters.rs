//! Filter types for querying saved routes.

/// Filter options for listing saved routes.
///
/// The default lists every non-deleted route regardless of owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteFilter {
    /// Include soft-deleted routes
    pub include_deleted: bool,

    /// Only routes tagged with this owner
    pub owner_uid: Option<String>,
}

impl RouteFilter {
    /// Filter that also returns soft-deleted routes.
    pub fn with_deleted() -> Self {
        Self {
            include_deleted: true,
            ..Default::default()
        }
    }

    /// Restrict the filter to a single owner.
    pub fn owned_by(mut self, owner_uid: impl Into<String>) -> Self {
        self.owner_uid = Some(owner_uid.into());
        self
    }
}

impl From<&crate::params::ListRoutes> for RouteFilter {
    fn from(params: &crate::params::ListRoutes) -> Self {
        Self {
            include_deleted: params.include_deleted,
            owner_uid: params.owner_uid.clone(),
        }
    }
}
