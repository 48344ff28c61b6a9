use common::TicketWindowClient;
use soroban_sdk::{Address, Env};

use crate::ContractError;

/// Guard: revert unless `account` holds a farming ticket.
///
/// A ticket window that cannot be reached is reported as
/// `ExternalCallFailed`, not as a missing ticket.
pub fn require_ticket(
    env: &Env,
    ticket_window: &Address,
    account: &Address,
) -> Result<(), ContractError> {
    match TicketWindowClient::new(env, ticket_window).try_has_ticket(account) {
        Ok(Ok(true)) => Ok(()),
        Ok(Ok(false)) => Err(ContractError::AccessDenied),
        _ => Err(ContractError::ExternalCallFailed),
    }
}
