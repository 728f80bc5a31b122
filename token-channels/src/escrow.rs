//! Escrow ledger adapter.
//!
//! Moves deposits into custody and payouts out of it through the token's own
//! ledger (bank module or CW20 contract). Holds no state: every check queries
//! the ledger, and every movement is returned as a message that commits or
//! reverts together with the calling handler's storage writes.

use common::AssetInfo;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, Deps, Env, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use crate::error::ContractError;
use crate::state::Channel;

/// Check the attached/approved deposit for an `Open` call and build the pull message.
///
/// Native deposits arrive with the call itself, so no message is returned.
/// CW20 deposits are pulled with `TransferFrom` against a prior allowance.
pub fn collect_deposit(
    deps: Deps,
    env: &Env,
    sender: &Addr,
    token: &AssetInfo,
    deposit: Uint128,
    funds: &[Coin],
) -> Result<Vec<CosmosMsg>, ContractError> {
    match token {
        AssetInfo::Native { denom } => {
            let transferred = funds
                .iter()
                .filter(|c| &c.denom == denom)
                .map(|c| c.amount)
                .sum::<Uint128>();

            if funds.len() != 1 || transferred != deposit {
                return Err(ContractError::DepositMismatch {
                    declared: deposit,
                    transferred,
                });
            }
            Ok(vec![])
        }
        AssetInfo::Cw20 { contract_addr } => {
            if !funds.is_empty() {
                return Err(ContractError::DepositMismatch {
                    declared: deposit,
                    transferred: funds.iter().map(|c| c.amount).sum(),
                });
            }

            let allowance = cw20_allowance(deps, env, contract_addr, sender)?;
            let balance = cw20_balance(deps, contract_addr, sender)?;
            if allowance < deposit || balance < deposit {
                return Err(ContractError::AllowanceInsufficient {
                    required: deposit,
                    allowance,
                    balance,
                });
            }

            Ok(vec![CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: contract_addr.clone(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: sender.to_string(),
                    recipient: env.contract.address.to_string(),
                    amount: deposit,
                })?,
                funds: vec![],
            })])
        }
    }
}

/// Check a deposit already pushed into custody through the CW20 receive hook.
pub fn check_pushed_deposit(deposit: Uint128, received: Uint128) -> Result<(), ContractError> {
    if received != deposit {
        return Err(ContractError::DepositMismatch {
            declared: deposit,
            transferred: received,
        });
    }
    Ok(())
}

/// Build the payout for a settling channel: `value` to the recipient and the
/// remainder of the deposit back to the sender.
///
/// Fails with `TransferFailed` when custody cannot cover the deposit. Zero
/// legs are skipped since neither ledger accepts zero-amount transfers.
pub fn settlement_messages(
    deps: Deps,
    env: &Env,
    channel: &Channel,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let available = custody_balance(deps, env, &channel.token)?;
    if available < channel.deposit {
        return Err(ContractError::TransferFailed {
            token: channel.token.to_string(),
            available,
            required: channel.deposit,
        });
    }

    let (to_recipient, to_sender) = channel.settlement();
    let mut messages = vec![];
    if !to_recipient.is_zero() {
        messages.push(transfer_msg(&channel.token, &channel.recipient, to_recipient)?);
    }
    if !to_sender.is_zero() {
        messages.push(transfer_msg(&channel.token, &channel.sender, to_sender)?);
    }
    Ok(messages)
}

/// Amount of `token` held by this contract.
pub fn custody_balance(deps: Deps, env: &Env, token: &AssetInfo) -> Result<Uint128, ContractError> {
    match token {
        AssetInfo::Native { denom } => Ok(deps
            .querier
            .query_balance(&env.contract.address, denom)?
            .amount),
        AssetInfo::Cw20 { contract_addr } => {
            cw20_balance(deps, contract_addr, &env.contract.address)
        }
    }
}

fn transfer_msg(
    token: &AssetInfo,
    to: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let msg = match token {
        AssetInfo::Native { denom } => CosmosMsg::Bank(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        }),
        AssetInfo::Cw20 { contract_addr } => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.clone(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount,
            })?,
            funds: vec![],
        }),
    };
    Ok(msg)
}

fn cw20_allowance(
    deps: Deps,
    env: &Env,
    contract_addr: &str,
    owner: &Addr,
) -> Result<Uint128, ContractError> {
    let response: AllowanceResponse = deps.querier.query_wasm_smart(
        contract_addr,
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;

    if response.expires.is_expired(&env.block) {
        return Ok(Uint128::zero());
    }
    Ok(response.allowance)
}

fn cw20_balance(deps: Deps, contract_addr: &str, address: &Addr) -> Result<Uint128, ContractError> {
    let response: BalanceResponse = deps.querier.query_wasm_smart(
        contract_addr,
        &Cw20QueryMsg::Balance {
            address: address.to_string(),
        },
    )?;
    Ok(response.balance)
}
