use soroban_sdk::{contractclient, Address, Env};

/// Reserve that holds reward tokens and pays them out to approved spenders.
///
/// Every spender has a wallet limit managed by the cashbox owner. A payout
/// above the remaining limit, or above the cashbox balance, fails the call.
#[contractclient(name = "CashboxClient")]
pub trait Cashbox {
    /// Transfer `amount` reward tokens to `to`, charged against `spender`'s
    /// wallet limit. `spender` must authorize the call.
    fn payout(env: Env, spender: Address, to: Address, amount: i128);
}

/// Sales window for the non-transferable farming ticket.
#[contractclient(name = "TicketWindowClient")]
pub trait TicketWindow {
    fn has_ticket(env: Env, account: Address) -> bool;
}
