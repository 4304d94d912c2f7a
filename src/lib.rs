//! Versus AI - scripted real-time strategy opponent
//!
//! One rule-based controller per race, tuned by a skill rating (error rate
//! and reaction delay) and a personality (opener and attack timing).

pub mod catalog;
pub mod command;
pub mod controller;
pub mod core;
pub mod driver;
pub mod personality;
pub mod plan;
pub mod skill;
pub mod snapshot;
