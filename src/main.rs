//! Rangefinder firmware entry point
//!
//! Initializes the RP2350 and spawns the measurement tasks.

#![no_std]
#![no_main]

use crate::task::{echo::echo_capture, report::report, trigger::trigger_schedule};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{AssignedResources, EchoResources, SerialResources, TriggerResources};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    // The capture task must be armed for the echo's rising edge before the
    // first trigger pulse can fire.
    spawner.spawn(echo_capture(r.echo)).unwrap();
    spawner.spawn(trigger_schedule(r.trigger)).unwrap();
    spawner.spawn(report(r.serial)).unwrap();
}
