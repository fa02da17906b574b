use crate::appstate::AppState;
use crate::error::validator::ValidatorError;
use crate::repository::validator::{
    ValidatorRepository, ValidatorRepositoryTrait,
};
use crate::response::validator::Validator;

#[derive(Clone)]
pub struct ValidatorService {
    validator_repo: ValidatorRepository,
}

impl ValidatorService {
    pub fn new(app_state: AppState) -> Self {
        Self {
            validator_repo: ValidatorRepository::new(app_state),
        }
    }

    pub async fn get_validators_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<Validator>, ValidatorError> {
        let validators = self
            .validator_repo
            .find_seqs_by_height(height)
            .await
            .map_err(ValidatorError::Database)?;

        Ok(validators.into_iter().map(Validator::from).collect())
    }
}
