use marker_glide::{
    core::builder::{MOVING_MARKER_ID, START_MARKER_ID},
    prelude::*,
};

/// Plays the glide without any UI, logging progress as it goes.
///
/// Pass a JSON scene config path to override the default run.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    marker_glide::init_debug_logging();

    println!("🗺️ Marker Glide Headless Example");
    println!("================================");

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::default(),
    };
    let builder = SceneBuilder::from_config(config);
    let mut map = builder.build()?;

    println!("✅ Scene built with layers {:?}", map.list_layers());
    for line in InfoPanel::from_config(builder.animation_config()).lines() {
        println!("   {line}");
    }

    let plan = MotionPlan::new(builder.animation_config())?;
    println!("\n📐 Plan:");
    println!("   Distance: {:.1} m", plan.total_distance);
    println!("   Step: {:.3} m", plan.step_distance);
    println!("   Steps: {}", plan.total_steps);
    println!("   Heading: {:.2}° (icon rotation {:.2}°)", plan.heading_deg, plan.rotation_deg);

    // The player drives a shared copy of the moving marker
    let moving = map
        .marker(MOVING_MARKER_ID)
        .map(|marker| {
            Marker::new(MOVING_MARKER_ID.to_string(), marker.lat_lng())
                .with_icon(builder.arrow_icon())
        })
        .ok_or_else(|| anyhow::anyhow!("scene has no moving marker"))?;
    let moving = Arc::new(Mutex::new(moving));

    let player = MotionPlayer::start(
        builder.animation_config().clone(),
        builder.arrow_icon(),
        Arc::clone(&moving),
    )?;

    println!("\n🚀 Gliding:");
    let mut progress = tokio::time::interval(Duration::from_secs(1));
    let finished = loop {
        tokio::select! {
            state = player.wait() => break state,
            _ = progress.tick() => {
                let state = player.state();
                println!(
                    "   step {:>5}/{} at ({:.5}, {:.5})",
                    state.step, state.total_steps, state.position.lat, state.position.lng
                );
            }
        }
    };

    let end = moving
        .lock()
        .map(|marker| marker.lat_lng())
        .map_err(|_| anyhow::anyhow!("moving marker lock poisoned"))?;
    map.apply_update(MOVING_MARKER_ID, MarkerUpdate::Position(end))?;

    println!("\n📊 Final state:");
    println!("   Finished: {}", finished.finished);
    println!("   Marker at: {:.6}, {:.6}", end.lat, end.lng);
    if let Some(start) = map.marker(START_MARKER_ID) {
        println!(
            "   Travelled: {:.1} m",
            start.lat_lng().distance_to(&end)
        );
    }

    map.remove();
    println!("\n✅ Headless example completed successfully!");
    Ok(())
}
