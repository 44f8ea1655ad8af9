//! Shared fixtures for exchange integration tests
#![allow(dead_code)]

use exchange::{AddLiquidity, Exchange, Ledger, RemoveLiquidity, SwapExactIn};
use token::{
    address_from_label, Address, FungibleToken, InMemoryTokenBank, StandardToken, TokenBank,
    TokenMetadata, U256,
};

pub const START: u64 = 1_700_000_000;
pub const FUNDING: u64 = 1_000_000_000;

pub struct Fixture {
    pub ledger: Ledger<InMemoryTokenBank>,
    pub exchange: Address,
    pub alice: Address,
    pub bob: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub token_c: Address,
}

pub fn u(v: u64) -> U256 {
    U256::from(v)
}

fn metadata(symbol: &str) -> TokenMetadata {
    TokenMetadata {
        name: format!("{symbol} Test Token"),
        symbol: symbol.to_string(),
        decimals: 18,
    }
}

/// Three tokens, two funded accounts, unlimited approvals to the exchange
pub fn fixture() -> Fixture {
    let alice = address_from_label("alice");
    let bob = address_from_label("bob");
    let token_a = address_from_label("AAA");
    let token_b = address_from_label("BBB");
    let token_c = address_from_label("CCC");

    let mut bank = InMemoryTokenBank::new();
    for (address, symbol) in [(token_a, "AAA"), (token_b, "BBB"), (token_c, "CCC")] {
        let token = StandardToken::new(address, metadata(symbol))
            .with_balance(alice, u(FUNDING))
            .unwrap()
            .with_balance(bob, u(FUNDING))
            .unwrap();
        bank.register(token).unwrap();
    }

    let exchange = Exchange::new(address_from_label("exchange"));
    let custodian = exchange.address();
    let mut ledger = Ledger::new(exchange, bank, START);
    for account in [alice, bob] {
        for token in [token_a, token_b, token_c] {
            ledger.approve(account, token, custodian, U256::MAX).unwrap();
        }
    }

    Fixture {
        ledger,
        exchange: custodian,
        alice,
        bob,
        token_a,
        token_b,
        token_c,
    }
}

pub fn add(
    token_a: Address,
    token_b: Address,
    desired: (u64, u64),
    min: (u64, u64),
    to: Address,
) -> AddLiquidity {
    AddLiquidity {
        token_a,
        token_b,
        amount_a_desired: u(desired.0),
        amount_b_desired: u(desired.1),
        amount_a_min: u(min.0),
        amount_b_min: u(min.1),
        to,
        deadline: START,
    }
}

pub fn remove(
    token_a: Address,
    token_b: Address,
    liquidity: U256,
    min: (u64, u64),
    to: Address,
) -> RemoveLiquidity {
    RemoveLiquidity {
        token_a,
        token_b,
        liquidity,
        amount_a_min: u(min.0),
        amount_b_min: u(min.1),
        to,
        deadline: START,
    }
}

pub fn swap(path: Vec<Address>, amount_in: u64, amount_out_min: u64, to: Address) -> SwapExactIn {
    SwapExactIn {
        amount_in: u(amount_in),
        amount_out_min: u(amount_out_min),
        path,
        to,
        deadline: START,
    }
}

pub fn balance(fx: &Fixture, token: Address, account: Address) -> U256 {
    fx.ledger.bank().balance_of(&token, &account).unwrap()
}

/// For every token: the exchange's custodial balance equals the sum of the
/// reserves recorded for that token across every pair it appears in
pub fn custody_matches_reserves(ledger: &Ledger<InMemoryTokenBank>) -> bool {
    let exchange = ledger.exchange();
    ledger.bank().tokens().all(|asset| {
        let address = asset.address();
        let recorded = exchange
            .registry()
            .iter()
            .fold(U256::zero(), |acc, (key, pair)| {
                let mut acc = acc;
                if key.token_a == address {
                    acc += pair.reserve_a();
                }
                if key.token_b == address {
                    acc += pair.reserve_b();
                }
                acc
            });
        recorded == asset.balance_of(&exchange.address())
    })
}
