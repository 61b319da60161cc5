#![allow(dead_code)]

use ramm::*;

pub const ETH: AssetId = AssetId(1);
pub const MATIC: AssetId = AssetId(2);
pub const USDT: AssetId = AssetId(3);

/// All test assets use 8 decimal places.
pub const UNIT: u64 = 100_000_000;

/// Oracle mantissas are quoted at scale 9.
pub const ORACLE_SCALE: u8 = 9;

/// An arbitrary epoch-ish origin, milliseconds.
pub const T0: u64 = 1_000_000_000_000;

pub fn pool2() -> (Pool<2>, AdminCap) {
    let (mut pool, admin, cap) = Pool::<2>::new(PoolId(1));
    pool.add_asset(ETH, 8, 1, &cap).unwrap();
    pool.add_asset(USDT, 8, 1, &cap).unwrap();
    pool.initialize(cap).unwrap();
    (pool, admin)
}

pub fn pool3() -> (Pool<3>, AdminCap) {
    let (mut pool, admin, cap) = Pool::<3>::new(PoolId(2));
    pool.add_asset(ETH, 8, 1, &cap).unwrap();
    pool.add_asset(MATIC, 8, 1, &cap).unwrap();
    pool.add_asset(USDT, 8, 1, &cap).unwrap();
    pool.initialize(cap).unwrap();
    (pool, admin)
}

/// ETH at `eth_price` whole USDT, USDT at par, both published at `now`.
pub fn feeds2(eth_price: u128, now: u64) -> [PriceFeed; 2] {
    [
        PriceFeed::new(ETH, eth_price * 1_000_000_000, ORACLE_SCALE, now),
        PriceFeed::new(USDT, 1_000_000_000, ORACLE_SCALE, now),
    ]
}

/// The whitepaper price triple: ETH 1800, MATIC 1.2, USDT 1.
pub fn feeds3(now: u64) -> [PriceFeed; 3] {
    [
        PriceFeed::new(ETH, 1_800_000_000_000, ORACLE_SCALE, now),
        PriceFeed::new(MATIC, 1_200_000_000, ORACLE_SCALE, now),
        PriceFeed::new(USDT, 1_000_000_000, ORACLE_SCALE, now),
    ]
}

pub fn deposit2(pool: &mut Pool<2>, asset: AssetId, units: u64, now: u64) -> LpCoin {
    let mut coin = Coin::mint(asset, units * UNIT);
    let lp = liquidity_deposit_2(pool, now, &mut coin, &feeds2(2_000, now)).unwrap();
    assert_eq!(coin.value(), 0);
    lp
}

pub fn deposit3(pool: &mut Pool<3>, asset: AssetId, units: u64, now: u64) -> LpCoin {
    let mut coin = Coin::mint(asset, units * UNIT);
    let lp = liquidity_deposit_3(pool, now, &mut coin, &feeds3(now)).unwrap();
    assert_eq!(coin.value(), 0);
    lp
}

/// The whitepaper initial three-asset pool: 200 ETH / 200k MATIC / 400k USDT.
pub fn whitepaper_pool() -> (Pool<3>, AdminCap) {
    let (mut pool, admin) = pool3();
    deposit3(&mut pool, ETH, 200, T0);
    deposit3(&mut pool, MATIC, 200_000, T0);
    deposit3(&mut pool, USDT, 400_000, T0);
    (pool, admin)
}

/// The two-asset example pool: 500 ETH / 900k USDT at 2000.
pub fn example_pool2() -> (Pool<2>, AdminCap) {
    let (mut pool, admin) = pool2();
    deposit2(&mut pool, ETH, 500, T0);
    deposit2(&mut pool, USDT, 900_000, T0);
    (pool, admin)
}

pub fn balances<const N: usize>(pool: &Pool<N>) -> [u128; N] {
    let mut out = [0u128; N];
    for (value, k) in out.iter_mut().zip(0..N) {
        *value = pool.slot(k).balance;
    }
    out
}

pub fn lp_supplies<const N: usize>(pool: &Pool<N>) -> [u128; N] {
    let mut out = [0u128; N];
    for (value, k) in out.iter_mut().zip(0..N) {
        *value = pool.slot(k).lp_supply;
    }
    out
}

pub fn collected_fees<const N: usize>(pool: &Pool<N>) -> [u128; N] {
    let mut out = [0u128; N];
    for (value, k) in out.iter_mut().zip(0..N) {
        *value = pool.slot(k).collected_fees;
    }
    out
}
