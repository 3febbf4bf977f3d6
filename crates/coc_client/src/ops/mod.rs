//! One async function per API lookup.

pub mod clan;
pub mod player;
pub mod war;
