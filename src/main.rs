use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use kruskal::sweep::{SweepConfig, SweepPlugin};

fn main() -> AppExit {
    App::new()
        .add_plugins(LogPlugin::default())
        .insert_resource(SweepConfig::parse())
        .add_plugins(SweepPlugin)
        .run()
}
