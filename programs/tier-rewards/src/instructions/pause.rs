use anchor_lang::prelude::*;
use crate::events::PauseToggled;
use crate::gate::{Gatekeeper, Operation, SessionLock};
use crate::state::{EngineConfig, ENGINE_CONFIG_SEED};

#[derive(Accounts)]
pub struct TogglePause<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,
}

pub fn pause(ctx: Context<TogglePause>) -> Result<()> {
    set_paused(ctx, true)
}

pub fn unpause(ctx: Context<TogglePause>) -> Result<()> {
    set_paused(ctx, false)
}

fn set_paused(ctx: Context<TogglePause>, paused: bool) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lock = SessionLock::default();
    let _session = Gatekeeper::new(&lock, &*ctx.accounts.config, &*ctx.accounts.config)
        .enter_ignoring_pause(&admin, Operation::TogglePause)?;

    ctx.accounts.config.set_paused(paused)?;

    emit!(PauseToggled { admin, paused });
    msg!("Engine {}", if paused { "paused" } else { "unpaused" });

    Ok(())
}
