//! Hardware Resource Management
//!
//! Allocates pins and peripherals to the measurement tasks. Each task owns
//! its resource group exclusively; nothing is shared.
//!
//! # Resource Groups
//! - Trigger: HC-SR04 trigger output
//! - Echo: HC-SR04 echo input
//! - Serial: reporting UART with its TX DMA channel

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// HC-SR04 trigger pulse output
    trigger: TriggerResources {
        trigger_pin: PIN_15,
    },
    /// HC-SR04 echo pulse input
    echo: EchoResources {
        echo_pin: PIN_14,
    },
    /// UART used to report distance readings
    serial: SerialResources {
        uart: UART0,
        tx_pin: PIN_0,
        tx_dma: DMA_CH0,
    },
}
