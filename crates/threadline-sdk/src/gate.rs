//! Role gate and registration
//!
//! The gate is advisory: the contract enforces roles on every write. Entering
//! a role area reads the connected account's profile and lets it through only
//! on an exact role match. Anything else, including a failed read, sends the
//! user back to login.

use crate::contract::{SupplyChainContract, TxReceipt};
use crate::error::{Result, SdkError};
use crate::models::{Address, Role, UserInfo};
use crate::route::Route;
use crate::wallet::WalletContext;

/// Outcome of entering a role-scoped area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(UserInfo),
    Redirect(Route),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow(_))
    }
}

/// Check that the connected account holds `required`
pub async fn authorize(
    contract: &dyn SupplyChainContract,
    wallet: &WalletContext,
    required: Role,
) -> Result<UserInfo> {
    let account = wallet.require()?;
    let user = contract.user_info(account).await?;
    match user.role {
        Some(role) if role == required => Ok(user),
        Some(role) => Err(SdkError::Unauthorized {
            required,
            actual: role.to_string(),
        }),
        None => Err(SdkError::Unauthorized {
            required,
            actual: "unregistered".to_string(),
        }),
    }
}

/// Fail-closed gate for a role area
pub async fn check_role(
    contract: &dyn SupplyChainContract,
    wallet: &WalletContext,
    required: Role,
) -> GateDecision {
    match authorize(contract, wallet, required).await {
        Ok(user) => GateDecision::Allow(user),
        Err(e) => {
            tracing::warn!(required = %required, error = %e, "Role gate redirecting to login");
            GateDecision::Redirect(Route::Login)
        }
    }
}

/// Where a freshly connected account should land
pub async fn landing(contract: &dyn SupplyChainContract, wallet: &WalletContext) -> Route {
    let Some(account) = wallet.active() else {
        return Route::Login;
    };
    match contract.user_info(account).await {
        Ok(UserInfo { role: Some(role), .. }) => Route::dashboard(role),
        Ok(_) => Route::Login,
        Err(e) => {
            tracing::warn!(account = %account, error = %e, "Profile read failed");
            Route::Login
        }
    }
}

/// Register the connected account
pub async fn register(
    contract: &dyn SupplyChainContract,
    wallet: &WalletContext,
    name: &str,
    location: &str,
    role: Role,
) -> Result<TxReceipt> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SdkError::validation("name", "is required"));
    }
    let account = wallet.require()?;
    let receipt = contract.register_user(account, name, location.trim(), role).await?;
    tracing::info!(
        account = %account,
        role = %role,
        tx = %receipt.transaction_hash,
        "User registered"
    );
    Ok(receipt)
}

/// Profile of any address
pub async fn profile(contract: &dyn SupplyChainContract, address: Address) -> Result<UserInfo> {
    contract.user_info(address).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::MockContract;

    fn account() -> Address {
        Address::from_bytes([3; 20])
    }

    #[tokio::test]
    async fn test_unregistered_redirects_for_every_role() {
        let contract = MockContract::new();
        let wallet = WalletContext::with_account(account());

        for role in Role::ALL {
            assert_eq!(
                check_role(&contract, &wallet, role).await,
                GateDecision::Redirect(Route::Login)
            );
        }
    }

    #[tokio::test]
    async fn test_matching_role_allowed() {
        let contract = MockContract::new().with_user(account(), "Weave Co", Role::Mill);
        let wallet = WalletContext::with_account(account());

        assert!(check_role(&contract, &wallet, Role::Mill).await.is_allowed());
        assert!(!check_role(&contract, &wallet, Role::Farmer).await.is_allowed());
        assert_eq!(landing(&contract, &wallet).await, Route::dashboard(Role::Mill));
    }

    #[tokio::test]
    async fn test_fail_closed() {
        let contract = MockContract::new().with_user(account(), "Weave Co", Role::Mill);
        contract.fail_user_info();
        let wallet = WalletContext::with_account(account());

        assert_eq!(
            check_role(&contract, &wallet, Role::Mill).await,
            GateDecision::Redirect(Route::Login)
        );
        assert_eq!(
            check_role(&contract, &WalletContext::new(), Role::Mill).await,
            GateDecision::Redirect(Route::Login)
        );
    }

    #[tokio::test]
    async fn test_register() {
        let contract = MockContract::new();
        let wallet = WalletContext::with_account(account());

        let err = register(&contract, &wallet, "  ", "", Role::Farmer).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation { .. }));
        assert_eq!(contract.write_calls(), 0);

        register(&contract, &wallet, "Asha", "Gujarat", Role::Farmer).await.unwrap();
        let user = profile(&contract, account()).await.unwrap();
        assert_eq!(user.role, Some(Role::Farmer));
        assert_eq!(user.location, "Gujarat");
    }
}
