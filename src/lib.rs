#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
#[cfg(feature = "std")]
mod actor;
mod bitboard;
mod board;
#[cfg(feature = "std")]
mod cli;
mod clock;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod ledger;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
mod ship;

#[cfg(feature = "std")]
pub use actor::{spawn_session, GameApi, SessionHandle};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
#[cfg(feature = "std")]
pub use cli::*;
pub use clock::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use ledger::{ScoreLedger, Scores};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use ship::*;
