use super::*;

impl PermissionAdminService {
    /// Builds the grant matrix of the scope over every active feature and action.
    pub async fn permission_matrix(
        &self,
        scope: &AccessScope,
    ) -> AppResult<Vec<PermissionMatrixFeature>> {
        let features = self.catalog_repository.list_active_features().await?;
        let permissions = self
            .permission_repository
            .find_active(scope.role_key(), scope.branch_key(), None)
            .await?;

        let mut matrix = Vec::with_capacity(features.len());
        for feature in features {
            let grant = permissions
                .iter()
                .find(|permission| permission.feature_key == feature.key().as_str());
            let actions = self
                .catalog_repository
                .list_active_actions(feature.key().as_str())
                .await?
                .into_iter()
                .map(|action| PermissionMatrixAction {
                    has_permission: grant
                        .is_some_and(|grant| grant.grants(action.action_key().as_str())),
                    action_key: action.action_key().to_string(),
                    action_name: action.action_name().to_string(),
                })
                .collect();

            matrix.push(PermissionMatrixFeature {
                feature_key: feature.key().to_string(),
                feature_name: feature.name().to_string(),
                actions,
            });
        }

        Ok(matrix)
    }
}
