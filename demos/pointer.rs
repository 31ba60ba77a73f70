//! Screen pointer demo over a recorded frame payload.
//!
//! Usage:
//!     cargo run --example pointer [payload.json]
//!
//! Without an argument a built-in payload is used.

use std::env;
use std::fs;

use leapframe::{Frame, FrameState};

const BUILTIN_PAYLOAD: &str = r#"{
    "id": 1017,
    "timestamp": 4572762,
    "hands": [{"id": 4, "palmPosition": [-12.5, 180.4, 20.1]}],
    "fingers": [
        {"id": 40, "tipPosition": [12.1, 200.5, -30.2],
         "stabilizedTipPosition": [12.0, 200.0, -30.0]},
        {"id": 41, "tipPosition": [40.7, 210.3, -28.9],
         "stabilizedTipPosition": [40.5, 210.0, -29.0]}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let payload = match args.get(1) {
        Some(path) => fs::read_to_string(path)?,
        None => BUILTIN_PAYLOAD.to_string(),
    };

    let frame = Frame::from_json(&payload)?;
    let state = FrameState::new(Some(frame));

    println!("frame id:    {:?}", state.frame_id());
    println!("timestamp:   {:?}", state.timestamp());
    println!("hands:       {}", state.hands_count());
    println!("fingers:     {}", state.fingers_count());
    println!("finger ids:  {:?}", state.finger_ids());

    match state.screen_position() {
        Some(screen) => println!("pointer:     ({:.1}, {:.1}) px", screen.x, screen.y),
        None => println!("pointer:     none"),
    }

    let avg = state.average_position();
    println!("average tip: ({:.1}, {:.1}, {:.1})", avg.x, avg.y, avg.z);

    Ok(())
}
