//! Token bank capability tests

use assert_matches::assert_matches;
use token::{
    address_from_label, InMemoryTokenBank, StandardToken, TokenBank, TokenError, TokenEvent,
    TokenMetadata, NULL_ADDRESS, U256,
};

fn metadata(symbol: &str) -> TokenMetadata {
    TokenMetadata {
        name: format!("{symbol} Token"),
        symbol: symbol.to_string(),
        decimals: 18,
    }
}

fn funded_bank() -> InMemoryTokenBank {
    let alice = address_from_label("alice");
    let mut bank = InMemoryTokenBank::new();
    let usdc = StandardToken::new(address_from_label("USDC"), metadata("USDC"))
        .with_balance(alice, U256::from(1_000u64))
        .unwrap();
    bank.register(usdc).unwrap();
    bank
}

#[test]
fn genesis_mints_are_journaled() {
    let bank = funded_bank();
    assert_eq!(bank.events().len(), 1);
    assert_matches!(
        &bank.events()[0],
        TokenEvent::Transfer { from, amount, .. } if *from == NULL_ADDRESS && *amount == U256::from(1_000u64)
    );
}

#[test]
fn transfer_and_allowance_flow_through_the_bank() {
    let mut bank = funded_bank();
    let usdc = address_from_label("USDC");
    let alice = address_from_label("alice");
    let bob = address_from_label("bob");
    let router = address_from_label("router");

    bank.approve(&usdc, alice, router, U256::from(300u64)).unwrap();
    bank.transfer_from(&usdc, router, alice, bob, U256::from(300u64))
        .unwrap();
    bank.transfer(&usdc, bob, alice, U256::from(100u64)).unwrap();

    assert_eq!(bank.balance_of(&usdc, &alice).unwrap(), U256::from(800u64));
    assert_eq!(bank.balance_of(&usdc, &bob).unwrap(), U256::from(200u64));
    assert_eq!(bank.allowance(&usdc, &alice, &router).unwrap(), U256::zero());

    let events = bank.take_events();
    assert_eq!(events.len(), 4);
    assert_matches!(events[1], TokenEvent::Approval { .. });
    assert!(bank.events().is_empty());
}

#[test]
fn unknown_tokens_are_rejected() {
    let mut bank = funded_bank();
    let ghost = address_from_label("GHOST");
    let alice = address_from_label("alice");

    assert_eq!(
        bank.balance_of(&ghost, &alice),
        Err(TokenError::UnknownToken(ghost))
    );
    assert_matches!(
        bank.transfer(&ghost, alice, alice, U256::one()),
        Err(TokenError::UnknownToken(_))
    );
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut bank = funded_bank();
    let again = StandardToken::new(address_from_label("USDC"), metadata("USDC"));
    assert_matches!(bank.register(again), Err(TokenError::DuplicateToken(_)));
    assert!(bank.find_by_symbol("USDC").is_some());
    assert_eq!(bank.tokens().count(), 1);
}
