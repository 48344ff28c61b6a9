//! Deferred external calls.
//!
//! Entry points record every token movement and cashbox payout here while
//! they update storage, then call [`Interactions::execute`] as their last
//! step. Nothing else in the crate talks to the token or cashbox contracts,
//! so a collaborator that calls back into the ledger always observes fully
//! written state.

use common::CashboxClient;
use soroban_sdk::{contracttype, token, Address, Env, Vec};

use crate::{events, ContractError};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Interaction {
    /// `(token, from, amount)`: move a user's tokens into the ledger.
    Pull(Address, Address, i128),
    /// `(token, to, amount)`: move tokens held by the ledger out.
    Push(Address, Address, i128),
    /// `(to, amount)`: reward tokens paid from the cashbox.
    Payout(Address, i128),
}

pub struct Interactions {
    env: Env,
    calls: Vec<Interaction>,
}

impl Interactions {
    pub fn new(env: &Env) -> Self {
        Interactions {
            env: env.clone(),
            calls: Vec::new(env),
        }
    }

    pub fn pull(&mut self, token: &Address, from: &Address, amount: i128) {
        if amount > 0 {
            self.calls
                .push_back(Interaction::Pull(token.clone(), from.clone(), amount));
        }
    }

    pub fn push(&mut self, token: &Address, to: &Address, amount: i128) {
        if amount > 0 {
            self.calls
                .push_back(Interaction::Push(token.clone(), to.clone(), amount));
        }
    }

    /// Pay a user's pending reward for `pool_id`.
    pub fn reward(&mut self, user: &Address, pool_id: u32, amount: i128) {
        if amount > 0 {
            events::publish_reward_paid(&self.env, user.clone(), pool_id, amount);
            self.calls
                .push_back(Interaction::Payout(user.clone(), amount));
        }
    }

    /// Pay the dev cut accumulated by the settlements of this operation.
    pub fn dev_cut(&mut self, dev: &Address, amount: i128) {
        if amount > 0 {
            events::publish_dev_cut_paid(&self.env, dev.clone(), amount);
            self.calls.push_back(Interaction::Payout(dev.clone(), amount));
        }
    }

    /// Perform every recorded call in order. The first failure aborts the
    /// whole invocation, rolling back all storage writes made before it.
    pub fn execute(self, cashbox: &Address) -> Result<(), ContractError> {
        let env = &self.env;
        let ledger = env.current_contract_address();

        for call in self.calls.iter() {
            let succeeded = match call {
                Interaction::Pull(token, from, amount) => matches!(
                    token::Client::new(env, &token).try_transfer(&from, &ledger, &amount),
                    Ok(Ok(()))
                ),
                Interaction::Push(token, to, amount) => matches!(
                    token::Client::new(env, &token).try_transfer(&ledger, &to, &amount),
                    Ok(Ok(()))
                ),
                Interaction::Payout(to, amount) => matches!(
                    CashboxClient::new(env, cashbox).try_payout(&ledger, &to, &amount),
                    Ok(Ok(()))
                ),
            };
            if !succeeded {
                return Err(ContractError::ExternalCallFailed);
            }
        }
        Ok(())
    }
}
