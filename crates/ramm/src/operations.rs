//! Operation engine.
//!
//! Each public operation validates its preconditions, prices every asset
//! through the oracle adapter, stages volatility updates on a copy of the
//! per-asset states, runs the pricing math, and only then commits the full
//! diff to the pool. Any error unwinds before the first mutation, so a failed
//! operation leaves the pool bit-identical and the caller's coins untouched.

use crate::{
    error::{ErrorCode, RammResult},
    events::ImbalanceRatiosEvent,
    math::{
        bignumber::U256,
        casting::Cast,
        constants::{BASE_WITHDRAWAL_FEE, MU, ONE, PROTOCOL_FEE},
        fees::scaled_fee_and_leverage,
        fixed_point::{div, mul},
        pricing::{trade_input_amount, trade_output_amount},
        safe_math::SafeMath,
        volatility::VolatilityState,
        weights::{check_imbalance_ratios, imbalance_ratios, weights},
    },
    state::{
        asset::AssetId,
        caps::AdminCap,
        coin::{Coin, LpCoin},
        oracle::PriceFeed,
        pool::Pool,
    },
    validate,
};

impl<const N: usize> Pool<N> {
    /// Trades a fixed inbound amount for the computed outbound amount.
    ///
    /// The whole inbound coin is the trade size. On success it is absorbed
    /// into the pool (protocol fee split into the fee sub-account) and the
    /// caller receives the outbound coin; on failure the coin is untouched.
    pub fn trade_amount_in(
        &mut self,
        now_ms: u64,
        coin_in: &mut Coin,
        asset_out: AssetId,
        min_amount_out: u64,
        oracles: &[PriceFeed; N],
    ) -> RammResult<Coin> {
        self.ensure_initialized()?;
        let idx_in = self.index_of(coin_in.asset())?;
        let idx_out = self.index_of(asset_out)?;
        validate!(idx_in != idx_out, ErrorCode::SameAssetTrade)?;

        let amount_in = coin_in.value();
        validate!(
            amount_in >= self.slot(idx_in).min_trade,
            ErrorCode::TradeAmountTooSmall
        )?;
        validate!(
            self.slot(idx_in).lp_supply > 0,
            ErrorCode::NoLPTokensInCirculation
        )?;
        validate!(
            self.slot(idx_out).balance > 0,
            ErrorCode::RAMMInsufficientBalance
        )?;

        let prices = self.kernel_prices(oracles, now_ms)?;
        let (staged_vol, vol_fees) = self.staged_volatility(&prices, now_ms)?;

        let balances = self.kernel_balances()?;
        let lp_supplies = self.kernel_lp_supplies()?;
        let weights = weights(&balances, &prices)?;
        let ratios = imbalance_ratios(&balances, &lp_supplies, &prices)?;

        let (scaled_fee, leverage) = scaled_fee_and_leverage(ratios[idx_in], ratios[idx_out])?;
        let total_fee_rate = scaled_fee
            .safe_add(vol_fees[idx_in])?
            .safe_add(vol_fees[idx_out])?;

        let factor_in = self.slot(idx_in).factor_balance;
        let factor_out = self.slot(idx_out).factor_balance;
        let amount_in_kernel = U256::from(amount_in).safe_mul(factor_in)?;
        validate!(
            amount_in_kernel <= mul(MU, balances[idx_in])?,
            ErrorCode::TradeExcessAmountIn
        )?;

        let curve_input = mul(amount_in_kernel, ONE.safe_sub(total_fee_rate)?)?;
        let amount_out_kernel = trade_output_amount(
            balances[idx_in],
            balances[idx_out],
            weights[idx_in],
            weights[idx_out],
            curve_input,
            leverage,
        )?;
        let amount_out = (amount_out_kernel / factor_out).try_to_u64()?;

        validate!(
            amount_out >= min_amount_out,
            ErrorCode::TradeBelowMinimumOut
        )?;
        validate!(
            amount_out_kernel <= mul(MU, balances[idx_out])?,
            ErrorCode::TradeExcessAmountOut
        )?;
        validate!(
            u128::from(amount_out) <= self.slot(idx_out).balance,
            ErrorCode::RAMMInsufficientBalance
        )?;
        validate!(
            u128::from(amount_out) < self.slot(idx_out).balance
                || self.slot(idx_out).lp_supply == 0,
            ErrorCode::InsufBalForCirculatingLPToken
        )?;

        let protocol_fee_kernel =
            mul(amount_in_kernel, mul(PROTOCOL_FEE, total_fee_rate)?)?;
        let protocol_fee = (protocol_fee_kernel / factor_in).try_to_u64()?;

        self.check_post_trade_ratios(
            &balances,
            &lp_supplies,
            &prices,
            &ratios,
            idx_in,
            idx_out,
            amount_in,
            protocol_fee,
            amount_out,
        )?;

        // all checks passed; commit the diff
        self.commit_volatility(staged_vol);
        let credited = amount_in.safe_sub(protocol_fee)?;
        let slot_in = self.slot_mut(idx_in);
        slot_in.balance = slot_in.balance.safe_add(u128::from(credited))?;
        slot_in.collected_fees = slot_in.collected_fees.safe_add(u128::from(protocol_fee))?;
        let slot_out = self.slot_mut(idx_out);
        slot_out.balance = slot_out.balance.safe_sub(u128::from(amount_out))?;

        coin_in.split(amount_in)?.burn();
        log::debug!(
            "trade_amount_in: pool={:?} in={:?} amount_in={} out={:?} amount_out={} protocol_fee={}",
            self.id(),
            self.slot(idx_in).asset,
            amount_in,
            asset_out,
            amount_out,
            protocol_fee
        );
        Ok(Coin::mint(asset_out, amount_out))
    }

    /// Trades a computed inbound amount for a fixed outbound amount.
    ///
    /// The required input is charged against `max_in` (which keeps the
    /// remainder) and the caller receives exactly `amount_out` of the
    /// outbound asset.
    pub fn trade_amount_out(
        &mut self,
        now_ms: u64,
        amount_out: u64,
        max_in: &mut Coin,
        asset_out: AssetId,
        oracles: &[PriceFeed; N],
    ) -> RammResult<Coin> {
        self.ensure_initialized()?;
        let idx_in = self.index_of(max_in.asset())?;
        let idx_out = self.index_of(asset_out)?;
        validate!(idx_in != idx_out, ErrorCode::SameAssetTrade)?;

        validate!(
            amount_out >= self.slot(idx_out).min_trade,
            ErrorCode::TradeAmountTooSmall
        )?;
        validate!(
            self.slot(idx_in).lp_supply > 0,
            ErrorCode::NoLPTokensInCirculation
        )?;
        validate!(
            u128::from(amount_out) <= self.slot(idx_out).balance,
            ErrorCode::RAMMInsufficientBalance
        )?;
        validate!(
            u128::from(amount_out) < self.slot(idx_out).balance
                || self.slot(idx_out).lp_supply == 0,
            ErrorCode::InsufBalForCirculatingLPToken
        )?;

        let prices = self.kernel_prices(oracles, now_ms)?;
        let (staged_vol, vol_fees) = self.staged_volatility(&prices, now_ms)?;

        let balances = self.kernel_balances()?;
        let lp_supplies = self.kernel_lp_supplies()?;
        let weights = weights(&balances, &prices)?;
        let ratios = imbalance_ratios(&balances, &lp_supplies, &prices)?;

        let (scaled_fee, leverage) = scaled_fee_and_leverage(ratios[idx_in], ratios[idx_out])?;
        let total_fee_rate = scaled_fee
            .safe_add(vol_fees[idx_in])?
            .safe_add(vol_fees[idx_out])?;

        let factor_in = self.slot(idx_in).factor_balance;
        let factor_out = self.slot(idx_out).factor_balance;
        let amount_out_kernel = U256::from(amount_out).safe_mul(factor_out)?;
        validate!(
            amount_out_kernel <= mul(MU, balances[idx_out])?,
            ErrorCode::TradeExcessAmountOut
        )?;

        let curve_input = trade_input_amount(
            balances[idx_in],
            balances[idx_out],
            weights[idx_in],
            weights[idx_out],
            amount_out_kernel,
            leverage,
        )?;
        let amount_in_kernel = div(curve_input, ONE.safe_sub(total_fee_rate)?)?;
        // the trader pays the ceiling; truncating would undercharge the pool
        let amount_in = amount_in_kernel.safe_ceil_div(factor_in)?.try_to_u64()?;

        validate!(amount_in <= max_in.value(), ErrorCode::TradeExcessAmountIn)?;
        validate!(
            U256::from(amount_in).safe_mul(factor_in)? <= mul(MU, balances[idx_in])?,
            ErrorCode::TradeExcessAmountIn
        )?;

        let protocol_fee_kernel = mul(
            U256::from(amount_in).safe_mul(factor_in)?,
            mul(PROTOCOL_FEE, total_fee_rate)?,
        )?;
        let protocol_fee = (protocol_fee_kernel / factor_in).try_to_u64()?;

        self.check_post_trade_ratios(
            &balances,
            &lp_supplies,
            &prices,
            &ratios,
            idx_in,
            idx_out,
            amount_in,
            protocol_fee,
            amount_out,
        )?;

        self.commit_volatility(staged_vol);
        let credited = amount_in.safe_sub(protocol_fee)?;
        let slot_in = self.slot_mut(idx_in);
        slot_in.balance = slot_in.balance.safe_add(u128::from(credited))?;
        slot_in.collected_fees = slot_in.collected_fees.safe_add(u128::from(protocol_fee))?;
        let slot_out = self.slot_mut(idx_out);
        slot_out.balance = slot_out.balance.safe_sub(u128::from(amount_out))?;

        max_in.split(amount_in)?.burn();
        log::debug!(
            "trade_amount_out: pool={:?} in={:?} amount_in={} out={:?} amount_out={} protocol_fee={}",
            self.id(),
            self.slot(idx_in).asset,
            amount_in,
            asset_out,
            amount_out,
            protocol_fee
        );
        Ok(Coin::mint(asset_out, amount_out))
    }

    /// Deposits a single asset and mints that asset's LP token.
    ///
    /// The first deposit into a slot mints one-for-one (normalized into LP
    /// decimals); later deposits mint pro-rata against the slot's balance.
    /// Deposits skip the imbalance check but still refresh every consulted
    /// volatility state.
    pub fn liquidity_deposit(
        &mut self,
        now_ms: u64,
        coin_in: &mut Coin,
        oracles: &[PriceFeed; N],
    ) -> RammResult<LpCoin> {
        self.ensure_initialized()?;
        let idx = self.index_of(coin_in.asset())?;
        let amount = coin_in.value();
        validate!(amount > 0, ErrorCode::InvalidDeposit)?;

        let prices = self.kernel_prices(oracles, now_ms)?;
        let (staged_vol, _) = self.staged_volatility(&prices, now_ms)?;

        let slot = self.slot(idx);
        let minted: u64 = if slot.lp_supply == 0 {
            let lp_decimals = self.lp_decimals();
            if lp_decimals >= slot.decimals {
                let scale = pow10_u128(lp_decimals - slot.decimals)?;
                u128::from(amount).safe_mul(scale)?.cast()?
            } else {
                let scale = pow10_u128(slot.decimals - lp_decimals)?;
                u128::from(amount).safe_div(scale)?.cast()?
            }
        } else {
            U256::from(amount)
                .safe_mul(U256::from(slot.lp_supply))?
                .safe_div(U256::from(slot.balance))?
                .try_to_u64()?
        };
        validate!(minted > 0, ErrorCode::InvalidDeposit)?;

        self.commit_volatility(staged_vol);
        let slot = self.slot_mut(idx);
        slot.balance = slot.balance.safe_add(u128::from(amount))?;
        slot.lp_supply = slot.lp_supply.safe_add(u128::from(minted))?;

        let asset = coin_in.asset();
        coin_in.split(amount)?.burn();
        log::debug!(
            "liquidity_deposit: pool={:?} asset={:?} amount={} minted={}",
            self.id(),
            asset,
            amount,
            minted
        );
        Ok(LpCoin::mint(asset, minted))
    }

    /// Burns LP tokens of one asset and redeems the matching share of pool
    /// value.
    ///
    /// The redemption is paid in the withdrawn asset while its balance
    /// lasts; any deficit is covered by the remaining assets pro-rata to
    /// their balance value at oracle prices. Every leg pays the withdrawal
    /// fee plus the withdrawn asset's volatility fee. When the last LP token
    /// of the pool is burned the provider sweeps every remaining balance, so
    /// truncation dust cannot be stranded.
    pub fn liquidity_withdrawal(
        &mut self,
        now_ms: u64,
        lp_coin: &mut LpCoin,
        oracles: &[PriceFeed; N],
    ) -> RammResult<Vec<Coin>> {
        self.ensure_initialized()?;
        let idx = self.index_of(lp_coin.asset())?;
        let lp_amount = lp_coin.value();
        validate!(
            lp_amount > 0 && u128::from(lp_amount) <= self.slot(idx).lp_supply,
            ErrorCode::InvalidWithdrawal
        )?;

        let prices = self.kernel_prices(oracles, now_ms)?;
        let (staged_vol, vol_fees) = self.staged_volatility(&prices, now_ms)?;

        let balances = self.kernel_balances()?;
        let lp_supplies = self.kernel_lp_supplies()?;

        // pool value per unit of LP value, over live slots only
        let mut lp_value = U256::zero();
        let mut balance_value = U256::zero();
        for k in 0..N {
            if self.slot(k).lp_supply > 0 {
                lp_value = lp_value.safe_add(mul(lp_supplies[k], prices[k])?)?;
                balance_value = balance_value.safe_add(mul(balances[k], prices[k])?)?;
            }
        }
        let redemption_rate = div(balance_value, lp_value)?;
        let lp_kernel = U256::from(lp_amount).safe_mul(self.factor_lp())?;
        let gross = mul(lp_kernel, redemption_rate)?;

        let fee_rate = BASE_WITHDRAWAL_FEE.safe_add(vol_fees[idx])?;

        let last_provider = u128::from(lp_amount) == self.slot(idx).lp_supply
            && (0..N).all(|k| k == idx || self.slot(k).lp_supply == 0);

        let mut payouts = [U256::zero(); N];
        if last_provider {
            payouts = balances;
        } else if gross <= balances[idx] {
            payouts[idx] = gross;
        } else {
            payouts[idx] = balances[idx];
            let deficit_value = mul(gross.safe_sub(balances[idx])?, prices[idx])?;
            let mut rest_value = U256::zero();
            for k in 0..N {
                if k != idx && self.slot(k).balance > 0 {
                    rest_value = rest_value.safe_add(mul(balances[k], prices[k])?)?;
                }
            }
            for k in 0..N {
                if k == idx || self.slot(k).balance == 0 {
                    continue;
                }
                let leg_value =
                    div(mul(deficit_value, mul(balances[k], prices[k])?)?, rest_value)?;
                payouts[k] = div(leg_value, prices[k])?;
            }
        }

        // stage raw legs and their fees, then check the redemption leaves no
        // slot drained while its LP still circulates
        let mut gross_raw = [0u64; N];
        let mut fee_raw = [0u64; N];
        for k in 0..N {
            if payouts[k].is_zero() {
                continue;
            }
            let factor = self.slot(k).factor_balance;
            gross_raw[k] = (payouts[k] / factor).try_to_u64()?;
            let fee_kernel = mul(U256::from(gross_raw[k]).safe_mul(factor)?, fee_rate)?;
            fee_raw[k] = (fee_kernel / factor).try_to_u64()?;

            let post_balance = self.slot(k).balance.safe_sub(u128::from(gross_raw[k]))?;
            let post_lp = if k == idx {
                self.slot(k).lp_supply.safe_sub(u128::from(lp_amount))?
            } else {
                self.slot(k).lp_supply
            };
            validate!(
                post_balance > 0 || post_lp == 0,
                ErrorCode::InsufBalForCirculatingLPToken
            )?;
        }

        self.commit_volatility(staged_vol);
        let mut out = Vec::new();
        let slot = self.slot_mut(idx);
        slot.lp_supply = slot.lp_supply.safe_sub(u128::from(lp_amount))?;
        for k in 0..N {
            if gross_raw[k] == 0 {
                continue;
            }
            let slot = self.slot_mut(k);
            slot.balance = slot.balance.safe_sub(u128::from(gross_raw[k]))?;
            slot.collected_fees = slot.collected_fees.safe_add(u128::from(fee_raw[k]))?;
            let net = gross_raw[k].safe_sub(fee_raw[k])?;
            if net > 0 {
                out.push(Coin::mint(slot.asset, net));
            }
        }

        lp_coin.split(lp_amount)?.burn();
        log::debug!(
            "liquidity_withdrawal: pool={:?} asset={:?} lp_burned={} legs={}",
            self.id(),
            lp_coin.asset(),
            lp_amount,
            out.len()
        );
        Ok(out)
    }

    /// Transfers every accrued protocol fee to the holder of the pool's
    /// admin capability and zeroes the fee sub-accounts.
    pub fn collect_fees(&mut self, admin: &AdminCap) -> RammResult<Vec<Coin>> {
        validate!(admin.pool_id == self.admin_id(), ErrorCode::NotAdmin)?;

        let mut out = Vec::new();
        for k in 0..N {
            let slot = self.slot_mut(k);
            if slot.collected_fees == 0 {
                continue;
            }
            let amount: u64 = slot.collected_fees.cast()?;
            slot.collected_fees = 0;
            out.push(Coin::mint(slot.asset, amount));
        }
        log::debug!("collect_fees: pool={:?} legs={}", self.id(), out.len());
        Ok(out)
    }

    /// Prices the pool and snapshots every imbalance ratio. Pure read: no
    /// balance or volatility state changes.
    pub fn imbalance_ratios_event(
        &self,
        now_ms: u64,
        oracles: &[PriceFeed; N],
    ) -> RammResult<ImbalanceRatiosEvent<N>> {
        self.ensure_initialized()?;
        let prices = self.kernel_prices(oracles, now_ms)?;
        let balances = self.kernel_balances()?;
        let lp_supplies = self.kernel_lp_supplies()?;
        let ratios = imbalance_ratios(&balances, &lp_supplies, &prices)?;
        Ok(ImbalanceRatiosEvent {
            pool_id: self.id(),
            timestamp_ms: now_ms,
            assets: self.asset_ids(),
            ratios,
        })
    }

    /// Validates and normalizes one oracle per slot, in slot order.
    fn kernel_prices(
        &self,
        oracles: &[PriceFeed; N],
        now_ms: u64,
    ) -> RammResult<[U256; N]> {
        let mut out = [U256::zero(); N];
        for k in 0..N {
            let scaled = oracles[k].price_at(self.slot(k).asset, now_ms)?;
            out[k] = scaled.kernel()?;
        }
        Ok(out)
    }

    /// Runs the volatility update for every consulted asset on a copy of the
    /// tracker states, returning the copy and the per-asset fees. The copy is
    /// committed only after every other check has passed.
    fn staged_volatility(
        &self,
        prices: &[U256; N],
        now_ms: u64,
    ) -> RammResult<([VolatilityState; N], [U256; N])> {
        let mut staged = self.volatility_states();
        let mut fees = [U256::zero(); N];
        for k in 0..N {
            fees[k] = staged[k].update(prices[k], now_ms)?;
        }
        Ok((staged, fees))
    }

    /// Recomputes the imbalance ratios for the hypothetical post-trade
    /// balances and applies the band rules.
    #[allow(clippy::too_many_arguments)]
    fn check_post_trade_ratios(
        &self,
        balances: &[U256; N],
        lp_supplies: &[U256; N],
        prices: &[U256; N],
        pre: &[U256; N],
        idx_in: usize,
        idx_out: usize,
        amount_in: u64,
        protocol_fee: u64,
        amount_out: u64,
    ) -> RammResult<()> {
        let mut post_balances = *balances;
        let credited = self
            .slot(idx_in)
            .balance
            .safe_add(u128::from(amount_in.safe_sub(protocol_fee)?))?;
        post_balances[idx_in] =
            U256::from(credited).safe_mul(self.slot(idx_in).factor_balance)?;
        let debited = self
            .slot(idx_out)
            .balance
            .safe_sub(u128::from(amount_out))?;
        post_balances[idx_out] =
            U256::from(debited).safe_mul(self.slot(idx_out).factor_balance)?;

        let post = imbalance_ratios(&post_balances, lp_supplies, prices)?;
        validate!(
            check_imbalance_ratios(pre, &post, idx_in, idx_out),
            ErrorCode::ImbalanceCheckFailed
        )
    }
}

/// `10^exp` as a u128, for raw-unit decimal rescaling.
fn pow10_u128(exp: u8) -> RammResult<u128> {
    10u128
        .checked_pow(u32::from(exp))
        .ok_or(ErrorCode::MathError)
}
