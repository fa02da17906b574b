use crate::appstate::AppState;
use crate::error::account::AccountError;
use crate::repository::account::{AccountRepository, AccountRepositoryTrait};
use crate::response::account::Account;

#[derive(Clone)]
pub struct AccountService {
    account_repo: AccountRepository,
}

impl AccountService {
    pub fn new(app_state: AppState) -> Self {
        Self {
            account_repo: AccountRepository::new(app_state),
        }
    }

    pub async fn get_account_by_public_key(
        &self,
        public_key: String,
    ) -> Result<Account, AccountError> {
        let account = self
            .account_repo
            .find_by_public_key(public_key.clone())
            .await
            .map_err(AccountError::Database)?
            .map(Account::from);

        account.ok_or(AccountError::NotFound(public_key))
    }
}
