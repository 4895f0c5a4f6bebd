//! ARM resource path builder
//!
//! Builds `/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}/...`
//! paths in one place so every client addresses resources the same way.

/// Builder for Azure Resource Manager resource paths
///
/// # Example
///
/// ```rust
/// use apim_provisioner::provider::azure::ArmPath;
///
/// let path = ArmPath::new("sub-123", "my-rg")
///     .provider("Microsoft.ApiManagement")
///     .resource("service", "my-apim")
///     .resource("apis", "my-api")
///     .build();
/// assert_eq!(
///     path,
///     "/subscriptions/sub-123/resourceGroups/my-rg/providers/Microsoft.ApiManagement/service/my-apim/apis/my-api"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ArmPath {
    subscription_id: String,
    resource_group: String,
    provider: Option<String>,
    segments: Vec<(String, String)>,
    action: Vec<String>,
}

impl ArmPath {
    pub fn new(subscription_id: impl Into<String>, resource_group: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            provider: None,
            segments: Vec::new(),
            action: Vec::new(),
        }
    }

    /// Resource provider namespace, e.g. `Microsoft.Web`
    #[must_use]
    pub fn provider(mut self, namespace: impl Into<String>) -> Self {
        self.provider = Some(namespace.into());
        self
    }

    /// Append a `{type}/{name}` pair
    #[must_use]
    pub fn resource(mut self, resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.segments.push((resource_type.into(), name.into()));
        self
    }

    /// Append trailing literal segments, e.g. `host/default/listkeys`
    #[must_use]
    pub fn action(mut self, segment: impl Into<String>) -> Self {
        self.action.push(segment.into());
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut path = format!(
            "/subscriptions/{}/resourceGroups/{}",
            urlencoding::encode(&self.subscription_id),
            urlencoding::encode(&self.resource_group)
        );

        if let Some(provider) = &self.provider {
            path.push_str("/providers/");
            path.push_str(provider);
        }

        for (resource_type, name) in &self.segments {
            path.push('/');
            path.push_str(resource_type);
            path.push('/');
            path.push_str(&urlencoding::encode(name));
        }

        for segment in &self.action {
            path.push('/');
            path.push_str(segment);
        }

        path
    }
}
