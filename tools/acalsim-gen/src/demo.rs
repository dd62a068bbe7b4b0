// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in demo tree.
//!
//! ```text
//! BaseSimTop
//! ├── SimulatorA (private, sima)
//! │   ├── ModuleA (shared, sima)
//! │   ├── ModuleB (shared, sima)
//! │   └── ModuleX (shared, sima)
//! ├── SimulatorB (shared)
//! └── SimulatorX (shared)
//! ```
//!
//! Module ports inside SimulatorA, and the same shape between simulators:
//!
//! ```text
//! ModuleA "ModuleA to X" ─┐
//!                         ├──> ModuleX "ModuleX from A/B"
//! ModuleB "ModuleB to X" ─┘
//! ModuleX "ModuleX to A" ────> ModuleA "ModuleA from X"
//! ModuleX "ModuleX to B" ────> ModuleB "ModuleB from X"
//! ```
//!
//! SimulatorA and SimulatorB each exchange a channel pair with SimulatorX.

use acalsim_codegen::{Coordinator, Module, Result, Simulator};

pub const TOP_NAME: &str = "BaseSimTop";

fn simulator_a(app: &str) -> Result<Simulator> {
    let mut sim = Simulator::new("SimulatorA").group("sima").app(app);
    for name in ["ModuleA", "ModuleB", "ModuleX"] {
        sim.add_module(Module::new(name).shared(true).group("sima").app(app))?;
    }

    sim.connect_port_with_queue("ModuleA", "ModuleX", "ModuleA to X", "ModuleX from A/B", 4)?;
    sim.connect_port_with_queue("ModuleB", "ModuleX", "ModuleB to X", "ModuleX from A/B", 4)?;
    sim.connect_port_with_queue("ModuleX", "ModuleA", "ModuleX to A", "ModuleA from X", 4)?;
    sim.connect_port_with_queue("ModuleX", "ModuleB", "ModuleX to B", "ModuleB from X", 4)?;
    Ok(sim)
}

/// Build the demo coordinator for `app`.
pub fn build(app: &str) -> Result<Coordinator> {
    let mut top = Coordinator::new(TOP_NAME, app);
    top.add_simulator(simulator_a(app)?)?;
    top.add_simulator(Simulator::new("SimulatorB").shared(true))?;
    top.add_simulator(Simulator::new("SimulatorX").shared(true))?;

    top.connect_port_with_queue(
        "SimulatorA",
        "SimulatorX",
        "SimulatorA to X",
        "SimulatorX from A/B",
        4,
    )?;
    top.connect_port_with_queue(
        "SimulatorB",
        "SimulatorX",
        "SimulatorB to X",
        "SimulatorX from A/B",
        4,
    )?;
    top.connect_port("SimulatorX", "SimulatorA", "SimulatorX to A", "SimulatorA from X")?;
    top.connect_port("SimulatorX", "SimulatorB", "SimulatorX to B", "SimulatorB from X")?;

    top.connect_channel("SimulatorA", "SimulatorX", "to SimulatorX", "from SimulatorA")?;
    top.connect_channel("SimulatorB", "SimulatorX", "to SimulatorX", "from SimulatorB")?;
    top.connect_channel("SimulatorX", "SimulatorA", "to SimulatorA", "from SimulatorX")?;
    top.connect_channel("SimulatorX", "SimulatorB", "to SimulatorB", "from SimulatorX")?;

    Ok(top)
}
