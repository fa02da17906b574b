use crate::appstate::AppState;
use crate::service::account::AccountService;
use crate::service::block::BlockService;
use crate::service::staking::StakingService;
use crate::service::transaction::TransactionService;
use crate::service::validator::ValidatorService;

#[derive(Clone)]
pub struct CommonState {
    pub block_service: BlockService,
    pub transaction_service: TransactionService,
    pub validator_service: ValidatorService,
    pub staking_service: StakingService,
    pub account_service: AccountService,
}

impl CommonState {
    pub fn new(data: AppState) -> Self {
        Self {
            block_service: BlockService::new(data.clone()),
            transaction_service: TransactionService::new(data.clone()),
            validator_service: ValidatorService::new(data.clone()),
            staking_service: StakingService::new(data.clone()),
            account_service: AccountService::new(data),
        }
    }
}
