use crate::appstate::AppState;
use crate::error::staking::StakingError;
use crate::repository::staking::{StakingRepository, StakingRepositoryTrait};
use crate::response::staking::{Delegation, DebondingDelegation, Staking};

#[derive(Clone)]
pub struct StakingService {
    staking_repo: StakingRepository,
}

impl StakingService {
    pub fn new(app_state: AppState) -> Self {
        Self {
            staking_repo: StakingRepository::new(app_state),
        }
    }

    pub async fn get_staking_by_height(
        &self,
        height: i64,
    ) -> Result<Staking, StakingError> {
        let staking = self
            .staking_repo
            .find_staking_by_height(height)
            .await
            .map_err(StakingError::Database)?
            .map(Staking::from);

        staking.ok_or(StakingError::NotFound(height))
    }

    pub async fn get_delegations_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<Delegation>, StakingError> {
        let delegations = self
            .staking_repo
            .find_delegations_by_height(height)
            .await
            .map_err(StakingError::Database)?;

        Ok(delegations.into_iter().map(Delegation::from).collect())
    }

    pub async fn get_debonding_delegations_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<DebondingDelegation>, StakingError> {
        let delegations = self
            .staking_repo
            .find_debonding_delegations_by_height(height)
            .await
            .map_err(StakingError::Database)?;

        Ok(delegations
            .into_iter()
            .map(DebondingDelegation::from)
            .collect())
    }
}
