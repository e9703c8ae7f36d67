use crossbeam_channel::Receiver;
use marker_glide::{
    animation::sink::{ChannelSink, MarkerUpdate},
    core::builder::MOVING_MARKER_ID,
    ui::view::GlideView,
    InfoPanel, Map, MotionPlayer, SceneBuilder, SceneConfig,
};

/// Plays the glide in a window. An optional JSON scene config path may be
/// passed as the first argument.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_path(&path)?,
        None => SceneConfig::default(),
    };
    let builder = SceneBuilder::from_config(config);
    let map = builder.build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Marker Glide"),
        ..Default::default()
    };

    eframe::run_native(
        "glide-app",
        options,
        Box::new(move |_cc| Box::new(GlideApp::new(builder, map))),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))?;

    Ok(())
}

struct GlideApp {
    builder: SceneBuilder,
    map: Map,
    info: InfoPanel,
    player: Option<MotionPlayer>,
    updates: Option<Receiver<MarkerUpdate>>,
    show_info: bool,
}

impl GlideApp {
    fn new(builder: SceneBuilder, map: Map) -> Self {
        let info = InfoPanel::from_config(builder.animation_config());
        let mut app = Self {
            builder,
            map,
            info,
            player: None,
            updates: None,
            show_info: true,
        };
        app.restart();
        app
    }

    /// Parks the arrow on the start point and plays from step 0
    fn restart(&mut self) {
        self.stop();

        let start = self.builder.animation_config().start;
        let arrow = self.builder.arrow_icon();
        for update in [MarkerUpdate::Position(start), MarkerUpdate::Icon(arrow.clone())] {
            if let Err(err) = self.map.apply_update(MOVING_MARKER_ID, update) {
                log::warn!("Could not reset moving marker: {err}");
            }
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        match MotionPlayer::start(
            self.builder.animation_config().clone(),
            arrow,
            ChannelSink::new(tx),
        ) {
            Ok(player) => {
                self.player = Some(player);
                self.updates = Some(rx);
            }
            Err(err) => log::error!("Could not start glide: {err}"),
        }
    }

    fn stop(&mut self) {
        if let Some(player) = self.player.take() {
            player.cancel();
        }
        self.updates = None;
    }

    fn drain_updates(&mut self) {
        let Some(updates) = &self.updates else {
            return;
        };
        for update in updates.try_iter() {
            if let Err(err) = self.map.apply_update(MOVING_MARKER_ID, update) {
                log::warn!("Dropping marker update: {err}");
            }
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Restart").clicked() {
                self.restart();
            }
            let running = self.player.as_ref().is_some_and(|player| player.is_running());
            if ui
                .add_enabled(running, egui::Button::new("Stop"))
                .clicked()
            {
                self.stop();
            }
            ui.checkbox(&mut self.show_info, "Info");

            ui.separator();
            if let Some(player) = &self.player {
                let state = player.state();
                ui.label(format!(
                    "Step {}/{} ({:.0}%) | Rotation: {:.2}°",
                    state.step,
                    state.total_steps,
                    state.progress() * 100.0,
                    state.rotation_deg
                ));
            }
        });
    }
}

impl eframe::App for GlideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_updates();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| self.status_bar(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = GlideView::new(&self.map);
            if self.show_info {
                ui.add(view.with_info(&self.info));
            } else {
                ui.add(view);
            }
        });

        let running = self.player.as_ref().is_some_and(|player| player.is_running());
        let pending = self.updates.as_ref().is_some_and(|rx| !rx.is_empty());
        if running || pending {
            ctx.request_repaint_after(self.builder.animation_config().refresh_interval());
        }
    }
}
