//! Test doubles for the ledger's collaborators.

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Env, Symbol,
};

const TOKEN: Symbol = symbol_short!("TOKEN");
const LIMIT: Symbol = symbol_short!("LIMIT");
const TICKET: Symbol = symbol_short!("TICKET");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CashboxError {
    NotInitialized = 1,
    LimitExceeded = 2,
}

/// Cashbox holding a single reward token with per-spender wallet limits.
#[contract]
pub struct MockCashbox;

#[contractimpl]
impl MockCashbox {
    pub fn initialize(env: Env, token: Address) {
        env.storage().instance().set(&TOKEN, &token);
    }

    pub fn set_wallet_limit(env: Env, spender: Address, limit: i128) {
        env.storage().persistent().set(&(LIMIT, spender), &limit);
    }

    pub fn wallet_limit(env: Env, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(LIMIT, spender))
            .unwrap_or(0)
    }

    pub fn payout(
        env: Env,
        spender: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), CashboxError> {
        spender.require_auth();

        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(CashboxError::NotInitialized)?;

        let key = (LIMIT, spender);
        let limit: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        if amount > limit {
            return Err(CashboxError::LimitExceeded);
        }
        env.storage().persistent().set(&key, &(limit - amount));

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);
        Ok(())
    }
}

/// Ticket window where tickets are issued and revoked by fiat.
#[contract]
pub struct MockTicketWindow;

#[contractimpl]
impl MockTicketWindow {
    pub fn issue_ticket(env: Env, account: Address) {
        env.storage().persistent().set(&(TICKET, account), &true);
    }

    pub fn revoke_ticket(env: Env, account: Address) {
        env.storage().persistent().remove(&(TICKET, account));
    }

    pub fn has_ticket(env: Env, account: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(TICKET, account))
            .unwrap_or(false)
    }
}
