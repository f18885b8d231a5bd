extern crate std;

use super::*;
use ed25519_dalek::{Signer, SigningKey};
use mock_token::{MockToken, MockTokenClient};
use peg_factory::{PegFactory, PegFactoryClient};
use peg_pair::PegPairClient;
use peg_types::{account_address, PairParams, PermitSignature};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{vec, Address, BytesN, Env, String, Vec};

const E18: i128 = 1_000_000_000_000_000_000;
/// One unit of a 7-decimal asset
const E7: i128 = 10_000_000;
const DEADLINE: u64 = 1_000_000;

struct RouterTest {
    env: Env,
    admin: Address,
    user: Address,
    factory: Address,
    native: Address,
    wrapped: Address,
    router: Address,
}

impl RouterTest {
    fn new() -> Self {
        Self::build(false)
    }

    /// Native asset backed by a `MockToken`, so accounts without trustlines can hold it
    fn with_mock_native() -> Self {
        Self::build(true)
    }

    fn build(mock_native: bool) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let user = Address::generate(&env);

        let factory = env.register(PegFactory, ());
        PegFactoryClient::new(&env, &factory).initialize(
            &admin,
            &BytesN::from_array(&env, &[7u8; 32]),
            &PairParams::default(),
        );

        let native = if mock_native {
            let native = create_token(&env, &admin, 7);
            MockTokenClient::new(&env, &native).mint(&user, &(1_000_000 * E7));
            native
        } else {
            let native = env.register_stellar_asset_contract_v2(admin.clone()).address();
            StellarAssetClient::new(&env, &native).mint(&user, &(1_000_000 * E7));
            native
        };
        let wrapped = create_token(&env, &admin, 7);
        MockTokenClient::new(&env, &wrapped).set_underlying(&native);

        let router = env.register(PegRouter, ());
        PegRouterClient::new(&env, &router).initialize(&factory, &native, &wrapped);

        RouterTest {
            env,
            admin,
            user,
            factory,
            native,
            wrapped,
            router,
        }
    }

    fn router(&self) -> PegRouterClient<'_> {
        PegRouterClient::new(&self.env, &self.router)
    }

    fn factory(&self) -> PegFactoryClient<'_> {
        PegFactoryClient::new(&self.env, &self.factory)
    }

    fn pair(&self, token_a: &Address, token_b: &Address) -> PegPairClient<'_> {
        let pair = self.factory().get_pair(token_a, token_b).unwrap();
        PegPairClient::new(&self.env, &pair)
    }

    /// New asset with a large balance for `user`
    fn token(&self, decimals: u32) -> Address {
        let token = create_token(&self.env, &self.admin, decimals);
        MockTokenClient::new(&self.env, &token).mint(&self.user, &(10i128.pow(decimals) * 1_000_000));
        token
    }

    /// Reserves of the `token_a`/`token_b` pair, in that order
    fn reserves(&self, token_a: &Address, token_b: &Address) -> (i128, i128) {
        let pair = self.pair(token_a, token_b);
        let (reserve0, reserve1, _) = pair.get_reserves();
        if pair.token0() == *token_a {
            (reserve0, reserve1)
        } else {
            (reserve1, reserve0)
        }
    }

    fn balance(&self, token: &Address, id: &Address) -> i128 {
        soroban_sdk::token::Client::new(&self.env, token).balance(id)
    }

    fn add_liquidity(&self, token_a: &Address, token_b: &Address, amount_a: i128, amount_b: i128) -> i128 {
        let (_, _, liquidity) = self.router().add_liquidity(
            &self.user, token_a, token_b, &amount_a, &amount_b, &0, &0, &self.user, &DEADLINE,
        );
        liquidity
    }
}

fn create_token(env: &Env, admin: &Address, decimals: u32) -> Address {
    let id = env.register(MockToken, ());
    MockTokenClient::new(env, &id).initialize(
        admin,
        &decimals,
        &String::from_str(env, "Token"),
        &String::from_str(env, "TKN"),
    );
    id
}

// === Initialization Tests ===

#[test]
fn test_initialize_router() {
    let t = RouterTest::new();
    assert_eq!(t.router().factory(), t.factory);
    assert_eq!(t.router().native(), t.native);
    assert_eq!(t.router().wrapped_native(), t.wrapped);
    assert_eq!(
        t.router().try_initialize(&t.factory, &t.native, &t.wrapped),
        Err(Ok(RouterError::AlreadyInitialized))
    );
}

// === Pricing Tests ===

#[test]
fn test_pricing_views() {
    let t = RouterTest::new();
    assert_eq!(t.router().quote(&E18, &(5 * E18), &(10 * E18)), 2 * E18);
    assert_eq!(
        t.router().get_amount_out(&E18, &(5 * E18), &(10 * E18)),
        1_662_497_915_624_478_906
    );
    assert_eq!(
        t.router().get_amount_in(&E18, &(5 * E18), &(10 * E18)),
        557_227_237_267_357_629
    );
    assert_eq!(
        t.router().try_get_amount_in(&(10 * E18), &(5 * E18), &(10 * E18)),
        Err(Ok(RouterError::InsufficientLiquidity))
    );
    assert_eq!(
        t.router().try_quote(&0, &(5 * E18), &(10 * E18)),
        Err(Ok(RouterError::InsufficientAmount))
    );
}

#[test]
fn test_amounts_need_a_path_and_pairs() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);

    assert_eq!(
        t.router().try_get_amounts_out(&E18, &vec![&t.env, token_a.clone()]),
        Err(Ok(RouterError::InvalidPath))
    );
    assert_eq!(
        t.router().try_get_amounts_out(&E18, &vec![&t.env, token_a, token_b]),
        Err(Ok(RouterError::PairNotFound))
    );
}

// === Liquidity Tests ===

#[test]
fn test_add_liquidity_creates_pair() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let predicted = t.factory().pair_address(&token_a, &token_b);

    let (amount_a, amount_b, liquidity) = t.router().add_liquidity(
        &t.user, &token_a, &token_b, &E18, &(4 * E18), &0, &0, &t.user, &DEADLINE,
    );

    assert_eq!((amount_a, amount_b), (E18, 4 * E18));
    assert_eq!(liquidity, 2 * E18 - 1000);
    assert_eq!(t.factory().get_pair(&token_a, &token_b), Some(predicted.clone()));
    assert_eq!(t.balance(&token_a, &predicted), E18);
    assert_eq!(t.balance(&token_b, &predicted), 4 * E18);
    assert_eq!(t.pair(&token_a, &token_b).balance(&t.user), liquidity);
}

#[test]
fn test_add_liquidity_uses_current_ratio() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    t.add_liquidity(&token_a, &token_b, 10 * E18, 20 * E18);

    // Too much B offered: B is trimmed to the ratio
    let (amount_a, amount_b, _) = t.router().add_liquidity(
        &t.user, &token_a, &token_b, &E18, &(5 * E18), &0, &0, &t.user, &DEADLINE,
    );
    assert_eq!((amount_a, amount_b), (E18, 2 * E18));

    // Too little B offered: A is trimmed instead
    let (amount_a, amount_b, _) = t.router().add_liquidity(
        &t.user, &token_a, &token_b, &(5 * E18), &E18, &0, &0, &t.user, &DEADLINE,
    );
    assert_eq!((amount_a, amount_b), (E18 / 2, E18));

    let pair = t.pair(&token_a, &token_b).address;
    assert_eq!(t.balance(&token_a, &pair), 10 * E18 + E18 + E18 / 2);
    assert_eq!(t.balance(&token_b, &pair), 20 * E18 + 2 * E18 + E18);
}

#[test]
fn test_add_liquidity_slippage_bounds() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    t.add_liquidity(&token_a, &token_b, 10 * E18, 20 * E18);

    assert_eq!(
        t.router().try_add_liquidity(
            &t.user, &token_a, &token_b, &E18, &(5 * E18), &0, &(3 * E18), &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::InsufficientBAmount))
    );
    assert_eq!(
        t.router().try_add_liquidity(
            &t.user, &token_a, &token_b, &(5 * E18), &E18, &E18, &0, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::InsufficientAAmount))
    );
    assert_eq!(
        t.router().try_add_liquidity(
            &t.user, &token_a, &token_b, &-1, &E18, &0, &0, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::NegativeAmount))
    );
}

#[test]
fn test_expired_deadline() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    t.env.ledger().set_timestamp(DEADLINE + 1);

    assert_eq!(
        t.router().try_add_liquidity(
            &t.user, &token_a, &token_b, &E18, &E18, &0, &0, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::Expired))
    );
    assert_eq!(
        t.router().try_swap_exact_tokens_for_tokens(
            &t.user,
            &E18,
            &0,
            &vec![&t.env, token_a, token_b],
            &t.user,
            &DEADLINE,
        ),
        Err(Ok(RouterError::Expired))
    );
}

#[test]
fn test_remove_liquidity() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let liquidity = t.add_liquidity(&token_a, &token_b, 10 * E18, 10 * E18);
    let pair = t.pair(&token_a, &token_b);
    pair.approve(&t.user, &t.router, &liquidity, &1_000);

    let receiver = Address::generate(&t.env);
    assert_eq!(
        t.router().try_remove_liquidity(
            &t.user, &token_a, &token_b, &liquidity, &(10 * E18), &0, &receiver, &DEADLINE,
        ),
        Err(Ok(RouterError::InsufficientAAmount))
    );

    let expected = 10 * E18 - 1000;
    let (amount_a, amount_b) = t.router().remove_liquidity(
        &t.user, &token_a, &token_b, &liquidity, &expected, &expected, &receiver, &DEADLINE,
    );
    assert_eq!((amount_a, amount_b), (expected, expected));
    assert_eq!(t.balance(&token_a, &receiver), expected);
    assert_eq!(t.balance(&token_b, &receiver), expected);
    assert_eq!(pair.balance(&t.user), 0);
    assert_eq!(pair.allowance(&t.user, &t.router), 0);
}

#[test]
fn test_remove_liquidity_without_approval_fails() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let liquidity = t.add_liquidity(&token_a, &token_b, 10 * E18, 10 * E18);

    assert!(t
        .router()
        .try_remove_liquidity(&t.user, &token_a, &token_b, &liquidity, &0, &0, &t.user, &DEADLINE)
        .is_err());
}

fn signed_permit(
    t: &RouterTest,
    key: &SigningKey,
    pair: &PegPairClient,
    owner: &Address,
    value: i128,
    approve_max: bool,
) -> PermitSignature {
    let digest = pair.permit_digest(owner, &t.router, &value, &pair.nonces(owner), &DEADLINE);
    let signature = key.sign(&digest.to_array());
    PermitSignature {
        public_key: BytesN::from_array(&t.env, &key.verifying_key().to_bytes()),
        signature: BytesN::from_array(&t.env, &signature.to_bytes()),
        approve_max,
    }
}

fn permit_owner(t: &RouterTest, seed: u8) -> (SigningKey, Address) {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let public_key = BytesN::from_array(&t.env, &key.verifying_key().to_bytes());
    (key, account_address(&t.env, &public_key))
}

#[test]
fn test_remove_liquidity_with_permit() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let (key, owner) = permit_owner(&t, 3);
    for token in [&token_a, &token_b] {
        MockTokenClient::new(&t.env, token).mint(&owner, &(10 * E18));
    }

    let (_, _, liquidity) = t.router().add_liquidity(
        &owner, &token_a, &token_b, &(10 * E18), &(10 * E18), &0, &0, &owner, &DEADLINE,
    );
    let pair = t.pair(&token_a, &token_b);
    let permit = signed_permit(&t, &key, &pair, &owner, liquidity, false);

    let (amount_a, amount_b) = t.router().remove_liquidity_with_permit(
        &owner, &token_a, &token_b, &liquidity, &0, &0, &owner, &DEADLINE, &permit,
    );

    assert_eq!((amount_a, amount_b), (10 * E18 - 1000, 10 * E18 - 1000));
    assert_eq!(pair.balance(&owner), 0);
    assert_eq!(pair.nonces(&owner), 1);
    assert_eq!(pair.allowance(&owner, &t.router), 0);
}

#[test]
fn test_remove_liquidity_with_max_permit() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let (key, owner) = permit_owner(&t, 4);
    for token in [&token_a, &token_b] {
        MockTokenClient::new(&t.env, token).mint(&owner, &(10 * E18));
    }

    let (_, _, liquidity) = t.router().add_liquidity(
        &owner, &token_a, &token_b, &(10 * E18), &(10 * E18), &0, &0, &owner, &DEADLINE,
    );
    let pair = t.pair(&token_a, &token_b);
    let permit = signed_permit(&t, &key, &pair, &owner, i128::MAX, true);

    t.router().remove_liquidity_with_permit(
        &owner, &token_a, &token_b, &(liquidity / 2), &0, &0, &owner, &DEADLINE, &permit,
    );
    assert_eq!(pair.allowance(&owner, &t.router), i128::MAX);
    assert_eq!(pair.balance(&owner), liquidity - liquidity / 2);
}

// === Swap Tests ===

#[test]
fn test_swap_exact_tokens_for_tokens() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    t.add_liquidity(&token_a, &token_b, 5 * E18, 10 * E18);
    let path = vec![&t.env, token_a.clone(), token_b.clone()];
    let expected_out = 1_662_497_915_624_478_906;

    assert_eq!(
        t.router().try_swap_exact_tokens_for_tokens(
            &t.user, &E18, &(expected_out + 1), &path, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::InsufficientOutputAmount))
    );

    let before_a = t.balance(&token_a, &t.user);
    let before_b = t.balance(&token_b, &t.user);
    let amounts = t.router().swap_exact_tokens_for_tokens(
        &t.user, &E18, &expected_out, &path, &t.user, &DEADLINE,
    );

    assert_eq!(amounts, vec![&t.env, E18, expected_out]);
    assert_eq!(t.balance(&token_a, &t.user), before_a - E18);
    assert_eq!(t.balance(&token_b, &t.user), before_b + expected_out);
}

#[test]
fn test_swap_tokens_for_exact_tokens() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    t.add_liquidity(&token_a, &token_b, 5 * E18, 10 * E18);
    let path = vec![&t.env, token_a.clone(), token_b.clone()];
    let expected_in = 557_227_237_267_357_629;

    assert_eq!(
        t.router().try_swap_tokens_for_exact_tokens(
            &t.user, &E18, &(expected_in - 1), &path, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::ExcessiveInputAmount))
    );

    let before_a = t.balance(&token_a, &t.user);
    let before_b = t.balance(&token_b, &t.user);
    let amounts = t.router().swap_tokens_for_exact_tokens(
        &t.user, &E18, &expected_in, &path, &t.user, &DEADLINE,
    );

    assert_eq!(amounts, vec![&t.env, expected_in, E18]);
    assert_eq!(t.balance(&token_a, &t.user), before_a - expected_in);
    assert_eq!(t.balance(&token_b, &t.user), before_b + E18);
}

#[test]
fn test_multi_hop_exact_input() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let token_c = t.token(18);
    t.add_liquidity(&token_a, &token_b, 10 * E18, 10 * E18);
    t.add_liquidity(&token_b, &token_c, 10 * E18, 20 * E18);
    let path = vec![&t.env, token_a.clone(), token_b.clone(), token_c.clone()];

    // Single-hop pricing applied twice over the reserves each pair holds
    let (reserve_a, reserve_b1) = t.reserves(&token_a, &token_b);
    let (reserve_b2, reserve_c) = t.reserves(&token_b, &token_c);
    let fee = PairParams::default().swap_fee;
    let hop1 = peg_math::get_amount_out(&t.env, E18, reserve_a, reserve_b1, fee).unwrap();
    let hop2 = peg_math::get_amount_out(&t.env, hop1, reserve_b2, reserve_c, fee).unwrap();

    let receiver = Address::generate(&t.env);
    let amounts = t.router().swap_exact_tokens_for_tokens(
        &t.user, &E18, &0, &path, &receiver, &DEADLINE,
    );

    assert_eq!(amounts, vec![&t.env, E18, hop1, hop2]);
    assert_eq!(t.balance(&token_c, &receiver), amounts.get_unchecked(2));
    assert_eq!(t.balance(&token_b, &receiver), 0);
    assert_eq!(t.balance(&token_b, &t.router), 0);

    // The intermediate amount went straight into the second pair
    let pair_bc = t.pair(&token_b, &token_c).address;
    assert_eq!(t.balance(&token_b, &pair_bc), 10 * E18 + amounts.get_unchecked(1));
}

#[test]
fn test_multi_hop_exact_output() {
    let t = RouterTest::new();
    let token_a = t.token(18);
    let token_b = t.token(18);
    let token_c = t.token(18);
    t.add_liquidity(&token_a, &token_b, 10 * E18, 10 * E18);
    t.add_liquidity(&token_b, &token_c, 10 * E18, 20 * E18);
    let path = vec![&t.env, token_a.clone(), token_b.clone(), token_c.clone()];

    let quoted = t.router().get_amounts_in(&E18, &path);
    let receiver = Address::generate(&t.env);
    let before_a = t.balance(&token_a, &t.user);
    let amounts = t.router().swap_tokens_for_exact_tokens(
        &t.user, &E18, &(10 * E18), &path, &receiver, &DEADLINE,
    );

    assert_eq!(amounts, quoted);
    assert_eq!(amounts.get_unchecked(2), E18);
    assert_eq!(t.balance(&token_c, &receiver), E18);
    assert_eq!(t.balance(&token_a, &t.user), before_a - amounts.get_unchecked(0));
}

// === Native Asset Tests ===

#[test]
fn test_add_liquidity_native_refunds_excess() {
    let t = RouterTest::new();
    let token = t.token(7);
    let native_before = t.balance(&t.native, &t.user);

    let (amount_token, amount_native, liquidity) = t.router().add_liquidity_native(
        &t.user, &token, &(1_000 * E7), &0, &(2_000 * E7), &0, &t.user, &DEADLINE,
    );
    assert_eq!((amount_token, amount_native), (1_000 * E7, 2_000 * E7));
    assert!(liquidity > 0);

    // Offers 500 native where the ratio asks for 200
    let (amount_token, amount_native, _) = t.router().add_liquidity_native(
        &t.user, &token, &(100 * E7), &0, &(500 * E7), &0, &t.user, &DEADLINE,
    );
    assert_eq!((amount_token, amount_native), (100 * E7, 200 * E7));

    let pair = t.pair(&token, &t.wrapped).address;
    assert_eq!(t.balance(&t.native, &t.user), native_before - 2_200 * E7);
    assert_eq!(t.balance(&t.native, &t.router), 0);
    assert_eq!(t.balance(&t.native, &t.wrapped), 2_200 * E7);
    assert_eq!(t.balance(&t.wrapped, &pair), 2_200 * E7);
}

#[test]
fn test_native_swaps() {
    let t = RouterTest::new();
    let token = t.token(7);
    t.router().add_liquidity_native(
        &t.user, &token, &(1_000 * E7), &0, &(1_000 * E7), &0, &t.user, &DEADLINE,
    );
    let to_token = vec![&t.env, t.wrapped.clone(), token.clone()];
    let to_native = vec![&t.env, token.clone(), t.wrapped.clone()];

    // Exact native in
    let native_before = t.balance(&t.native, &t.user);
    let token_before = t.balance(&token, &t.user);
    let amounts = t.router().swap_exact_native_for_tokens(
        &t.user, &(10 * E7), &0, &to_token, &t.user, &DEADLINE,
    );
    assert_eq!(t.balance(&t.native, &t.user), native_before - 10 * E7);
    assert_eq!(t.balance(&token, &t.user), token_before + amounts.get_unchecked(1));

    // Exact tokens in, native out
    let native_before = t.balance(&t.native, &t.user);
    let amounts = t.router().swap_exact_tokens_for_native(
        &t.user, &(10 * E7), &0, &to_native, &t.user, &DEADLINE,
    );
    assert_eq!(t.balance(&t.native, &t.user), native_before + amounts.get_unchecked(1));

    // Exact native out
    let native_before = t.balance(&t.native, &t.user);
    t.router().swap_tokens_for_exact_native(
        &t.user, &(5 * E7), &(100 * E7), &to_native, &t.user, &DEADLINE,
    );
    assert_eq!(t.balance(&t.native, &t.user), native_before + 5 * E7);

    // Exact tokens out, paid in native
    let native_before = t.balance(&t.native, &t.user);
    let token_before = t.balance(&token, &t.user);
    let amounts = t.router().swap_native_for_exact_tokens(
        &t.user, &(5 * E7), &(100 * E7), &to_token, &t.user, &DEADLINE,
    );
    assert_eq!(t.balance(&t.native, &t.user), native_before - amounts.get_unchecked(0));
    assert_eq!(t.balance(&token, &t.user), token_before + 5 * E7);

    assert_eq!(t.balance(&t.native, &t.router), 0);
    assert_eq!(t.balance(&t.wrapped, &t.router), 0);
}

#[test]
fn test_native_swaps_check_path_ends() {
    let t = RouterTest::new();
    let token = t.token(7);
    t.router().add_liquidity_native(
        &t.user, &token, &(1_000 * E7), &0, &(1_000 * E7), &0, &t.user, &DEADLINE,
    );
    let to_native = vec![&t.env, token.clone(), t.wrapped.clone()];
    let to_token = vec![&t.env, t.wrapped.clone(), token.clone()];

    assert_eq!(
        t.router().try_swap_exact_native_for_tokens(
            &t.user, &E7, &0, &to_native, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::InvalidPath))
    );
    assert_eq!(
        t.router().try_swap_exact_tokens_for_native(
            &t.user, &E7, &0, &to_token, &t.user, &DEADLINE,
        ),
        Err(Ok(RouterError::InvalidPath))
    );
}

#[test]
fn test_remove_liquidity_native() {
    let t = RouterTest::new();
    let token = t.token(7);
    let (_, _, liquidity) = t.router().add_liquidity_native(
        &t.user, &token, &(1_000 * E7), &0, &(1_000 * E7), &0, &t.user, &DEADLINE,
    );
    t.pair(&token, &t.wrapped)
        .approve(&t.user, &t.router, &liquidity, &1_000);

    let receiver = Address::generate(&t.env);
    let (amount_token, amount_native) = t.router().remove_liquidity_native(
        &t.user, &token, &liquidity, &0, &0, &receiver, &DEADLINE,
    );

    // Shares are counted at 18 decimals, so the locked minimum costs less than one raw unit
    assert_eq!((amount_token, amount_native), (1_000 * E7 - 1, 1_000 * E7 - 1));
    assert_eq!(t.balance(&token, &receiver), amount_token);
    assert_eq!(t.balance(&t.native, &receiver), amount_native);
    assert_eq!(t.balance(&t.wrapped, &t.router), 0);
}

#[test]
fn test_remove_liq_native_with_permit() {
    // Permit owners are bare ed25519 accounts with no trustline to a Stellar asset
    let t = RouterTest::with_mock_native();
    let token = t.token(7);
    let (key, owner) = permit_owner(&t, 5);
    MockTokenClient::new(&t.env, &token).mint(&owner, &(100 * E7));
    MockTokenClient::new(&t.env, &t.native).mint(&owner, &(100 * E7));

    let (_, _, liquidity) = t.router().add_liquidity_native(
        &owner, &token, &(100 * E7), &0, &(100 * E7), &0, &owner, &DEADLINE,
    );
    let pair = t.pair(&token, &t.wrapped);
    let permit = signed_permit(&t, &key, &pair, &owner, liquidity, false);

    assert_eq!(t.balance(&t.native, &owner), 0);

    let (amount_token, amount_native) = t.router().remove_liq_native_with_permit(
        &owner, &token, &liquidity, &0, &0, &owner, &DEADLINE, &permit,
    );
    assert_eq!((amount_token, amount_native), (100 * E7 - 1, 100 * E7 - 1));
    assert_eq!(pair.balance(&owner), 0);
    assert_eq!(pair.nonces(&owner), 1);
    assert_eq!(t.balance(&t.wrapped, &t.router), 0);
    assert_eq!(t.balance(&t.native, &owner), 100 * E7 - 1);
    assert_eq!(t.balance(&token, &owner), 100 * E7 - 1);
}

// === Mixed Decimals ===

/// Add liquidity at matching value on both sides, then check the ratio logic
fn check_decimals(decimals_a: u32, decimals_b: u32) {
    let t = RouterTest::new();
    let token_a = t.token(decimals_a);
    let token_b = t.token(decimals_b);
    let unit_a = 10i128.pow(decimals_a);
    let unit_b = 10i128.pow(decimals_b);
    let precision = decimals_a.max(decimals_b).max(18);

    let (amount_a, amount_b, liquidity) = t.router().add_liquidity(
        &t.user, &token_a, &token_b, &(100 * unit_a), &(100 * unit_b), &0, &0, &t.user, &DEADLINE,
    );
    assert_eq!((amount_a, amount_b), (100 * unit_a, 100 * unit_b));
    assert_eq!(liquidity, 100 * 10i128.pow(precision) - 1000);

    let (amount_a, amount_b, liquidity) = t.router().add_liquidity(
        &t.user,
        &token_a,
        &token_b,
        &(10 * unit_a),
        &(10 * unit_b),
        &(10 * unit_a),
        &(10 * unit_b),
        &t.user,
        &DEADLINE,
    );
    assert_eq!((amount_a, amount_b), (10 * unit_a, 10 * unit_b));
    assert_eq!(liquidity, 10 * 10i128.pow(precision));

    assert_eq!(
        t.router().try_add_liquidity(
            &t.user,
            &token_a,
            &token_b,
            &(10 * unit_a),
            &(20 * unit_b),
            &0,
            &(20 * unit_b),
            &t.user,
            &DEADLINE,
        ),
        Err(Ok(RouterError::InsufficientBAmount))
    );
    assert_eq!(
        t.router().try_add_liquidity(
            &t.user,
            &token_a,
            &token_b,
            &(20 * unit_a),
            &(10 * unit_b),
            &(20 * unit_a),
            &0,
            &t.user,
            &DEADLINE,
        ),
        Err(Ok(RouterError::InsufficientAAmount))
    );
}

#[test]
fn test_decimals_below_base_precision() {
    for (a, b) in [(10, 18), (10, 8), (10, 3), (10, 4), (1, 2)] {
        check_decimals(a, b);
        check_decimals(b, a);
    }
}

#[test]
fn test_decimals_above_base_precision() {
    for a in 19..=30 {
        check_decimals(a, 18);
        check_decimals(18, a);
    }
    check_decimals(19, 20);
    check_decimals(20, 19);
}

#[test]
fn test_swap_between_mixed_decimals() {
    let t = RouterTest::new();
    let token_a = t.token(6);
    let token_b = t.token(18);
    t.add_liquidity(&token_a, &token_b, 1_000 * 1_000_000, 1_000 * E18);
    let path = vec![&t.env, token_a.clone(), token_b.clone()];

    let amounts = t.router().swap_exact_tokens_for_tokens(
        &t.user, &(10 * 1_000_000), &0, &path, &t.user, &DEADLINE,
    );
    // About 9.87 units out for 10 in on a 1000/1000 pool
    let out = amounts.get_unchecked(1);
    assert!(out > 98 * E18 / 10 && out < 10 * E18);

    let back: Vec<Address> = vec![&t.env, token_b, token_a];
    let amounts = t.router().swap_tokens_for_exact_tokens(
        &t.user, &(5 * 1_000_000), &(10 * E18), &back, &t.user, &DEADLINE,
    );
    assert_eq!(amounts.get_unchecked(1), 5 * 1_000_000);
}

#[test]
fn test_million_unit_pool_with_thirty_decimals() {
    let t = RouterTest::new();
    let token_a = t.token(30);
    let token_b = t.token(18);
    let million_a = 1_000_000 * 10i128.pow(30);
    let million_b = 1_000_000 * E18;
    MockTokenClient::new(&t.env, &token_b).mint(&t.user, &(1_000 * E18));

    let (amount_a, amount_b, liquidity) = t.router().add_liquidity(
        &t.user, &token_a, &token_b, &million_a, &million_b, &0, &0, &t.user, &DEADLINE,
    );
    assert_eq!((amount_a, amount_b), (million_a, million_b));
    // sqrt(1e36 * 1e36) at 30 decimals
    assert_eq!(liquidity, 10i128.pow(36) - 1000);

    let fee = PairParams::default().swap_fee;
    let expected = peg_math::get_amount_out(&t.env, 1_000 * E18, million_b, million_a, fee).unwrap();
    let path = vec![&t.env, token_b.clone(), token_a.clone()];
    let amounts = t.router().swap_exact_tokens_for_tokens(
        &t.user, &(1_000 * E18), &0, &path, &t.user, &DEADLINE,
    );
    assert_eq!(amounts, vec![&t.env, 1_000 * E18, expected]);
    assert_eq!(t.balance(&token_a, &t.user), expected);
    assert_eq!(t.reserves(&token_a, &token_b), (million_a - expected, million_b + 1_000 * E18));
}
