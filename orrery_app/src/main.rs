//! Orrery demo application
//!
//! Builds a small solar-system scene: a spinning hub carrying a ring of
//! colored point lights, plus animated bodies whose keyframe sequences are
//! triggered from (scripted) keyboard input. Frames are published through
//! the N-buffered resource pipeline on a headless device, so the demo runs
//! anywhere and prints what it would have handed to a GPU.

use orbit_engine::prelude::*;

/// Colors for the orbiting light ring
const LIGHT_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.1, 0.1],
    [0.1, 0.1, 1.0],
    [0.1, 1.0, 0.1],
    [1.0, 1.0, 0.1],
    [0.1, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Key events injected at fixed frames, standing in for a real event loop
const SCRIPTED_INPUT: [(u64, KeyCode, bool); 7] = [
    (30, KeyCode::Key1, true),
    (32, KeyCode::Key1, false),
    (90, KeyCode::Key2, true),
    (92, KeyCode::Key2, false),
    (150, KeyCode::Key1, true), // retrigger while still playing: no-op
    (152, KeyCode::Key1, false),
    (400, KeyCode::Escape, true),
];

struct OrreryApp {
    graph: SceneGraph,
    playback: AnimationPlayback,
    input: InputManager,
    camera: Camera,
    device: HeadlessDevice,
    pipeline: FrameResourcePipeline,
    aggregator: LightAggregator,
    block: FrameUpdateBlock,
    hub: SceneObjectId,
    planet: SceneObjectId,
    comet: SceneObjectId,
}

fn bob_sequence(depth: f32) -> AnimationSequence {
    AnimationSequence::new(
        vec![
            AnimationKeyFrame {
                translation: Vec3::new(0.0, 0.0, 0.0),
                rotation: Vec3::zeros(),
                scale: Vec3::new(1.0, 1.0, 1.0),
                timestamp: 0.0,
            },
            AnimationKeyFrame {
                translation: Vec3::new(0.0, depth, 0.0),
                rotation: Vec3::new(0.0, std::f32::consts::PI, 0.0),
                scale: Vec3::new(1.2, 1.2, 1.2),
                timestamp: 2.0,
            },
            AnimationKeyFrame {
                translation: Vec3::new(0.0, 0.0, 0.0),
                rotation: Vec3::new(0.0, std::f32::consts::TAU, 0.0),
                scale: Vec3::new(1.0, 1.0, 1.0),
                timestamp: 3.9,
            },
        ],
        4.0,
    )
}

fn spin_sequence() -> AnimationSequence {
    AnimationSequence::new(
        vec![
            AnimationKeyFrame {
                translation: Vec3::zeros(),
                rotation: Vec3::zeros(),
                scale: Vec3::new(1.0, 1.0, 1.0),
                timestamp: 0.0,
            },
            AnimationKeyFrame {
                translation: Vec3::zeros(),
                rotation: Vec3::new(0.0, std::f32::consts::TAU, 0.0),
                scale: Vec3::new(1.0, 1.0, 1.0),
                timestamp: 8.0,
            },
        ],
        8.0,
    )
}

impl OrreryApp {
    fn new(config: &EngineConfig) -> Result<Self, RenderError> {
        log::info!("Creating orrery demo scene...");
        let mut graph = SceneGraph::new();

        // Hub at the origin; the light ring is parented to it so the whole
        // ring orbits as the hub's spin animation plays.
        let hub = graph.create_object();
        graph
            .get_mut(hub)
            .ok_or_else(|| RenderError::InitializationFailed("hub missing".to_string()))?
            .transform
            .animation = Some(spin_sequence());

        for (i, color) in LIGHT_COLORS.iter().enumerate() {
            let angle = (i as f32 / LIGHT_COLORS.len() as f32) * std::f32::consts::TAU;
            let light = graph.make_point_light(0.2, 0.1, Vec3::new(color[0], color[1], color[2]));
            if let Some(object) = graph.get_mut(light) {
                object.transform.translation =
                    Vec3::new(2.0 * angle.cos(), -1.0, 2.0 * angle.sin());
            }
            if let Err(err) = graph.set_parent(light, hub) {
                log::warn!("failed to attach light to hub: {err}");
            }
        }

        let mut device = HeadlessDevice::new();

        // Texture set bound once per frame slot; slot 0 is the flat default,
        // the rest are per-body surfaces addressed by texture_binding.
        let textures: Vec<_> = (0..4).map(|_| device.create_texture()).collect();

        let planet = graph.create_object();
        if let Some(object) = graph.get_mut(planet) {
            object.transform.translation = Vec3::new(-0.5, 0.5, 0.0);
            object.transform.scale = Vec3::new(3.0, 1.5, 3.0);
            object.transform.animation = Some(bob_sequence(-0.8));
            object.renderable = Some(std::sync::Arc::new(device.create_mesh()));
            object.texture_binding = 1;
        }

        let comet = graph.create_object();
        if let Some(object) = graph.get_mut(comet) {
            object.transform.translation = Vec3::new(0.5, 0.5, 0.0);
            object.transform.scale = Vec3::new(0.35, 0.35, 0.35);
            object.transform.animation = Some(bob_sequence(-1.5));
            object.renderable = Some(std::sync::Arc::new(device.create_mesh()));
            object.texture_binding = 2;
        }

        let pipeline = FrameResourcePipeline::new(
            &mut device,
            config.renderer.max_frames_in_flight,
            &textures,
        )?;
        let aggregator = LightAggregator::new(config.renderer.max_point_lights);

        let mut camera = Camera::new();
        camera.set_perspective_projection(
            50.0f32.to_radians(),
            16.0 / 9.0,
            0.1,
            100.0,
        );
        camera.set_view_target(
            Vec3::new(0.0, -2.0, -6.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        );

        log::info!(
            "Scene ready: {} objects, {} frames in flight",
            graph.len(),
            pipeline.frames_in_flight()
        );

        Ok(Self {
            graph,
            playback: AnimationPlayback::new(),
            input: InputManager::new(),
            camera,
            device,
            pipeline,
            aggregator,
            block: FrameUpdateBlock::new(),
            hub,
            planet,
            comet,
        })
    }

    fn run(&mut self) -> Result<(), RenderError> {
        let frames_in_flight = self.pipeline.frames_in_flight();
        let delta_time = 1.0 / 60.0;
        let mut timer = Timer::new();

        let mut frame: u64 = 0;
        loop {
            self.input.begin_frame();
            for (at, key, pressed) in SCRIPTED_INPUT {
                if at == frame {
                    self.input.handle_key_input(key, pressed);
                }
            }

            if self.input.just_pressed(KeyCode::Escape) {
                log::info!("escape pressed, shutting down after {frame} frames");
                break;
            }
            if self.input.just_pressed(KeyCode::Key1) {
                self.playback.trigger(self.planet);
            }
            if self.input.just_pressed(KeyCode::Key2) {
                self.playback.trigger(self.comet);
            }
            // Continuous re-trigger keeps the hub spinning across cycles.
            self.playback.trigger(self.hub);

            self.playback.tick_all(&mut self.graph, delta_time);

            self.block.set_camera(&self.camera);
            self.aggregator.update(&self.graph, &mut self.block);

            let frame_index = (frame as usize) % frames_in_flight;
            self.pipeline
                .publish(&mut self.device, frame_index, &self.block)?;

            timer.update();
            if frame % 100 == 0 {
                log::info!(
                    "frame {frame}: {} lights, planet at y={:.3}, {:.3}ms wall-clock",
                    self.block.active_light_count(),
                    self.graph
                        .get(self.planet)
                        .map_or(f32::NAN, |o| o.transform.translation.y),
                    timer.delta_time() * 1000.0
                );
            }
            frame += 1;
        }

        log::info!(
            "published {frame} frames across {frames_in_flight} slots (avg {:.1} fps wall-clock)",
            timer.average_fps()
        );
        Ok(())
    }
}

fn main() {
    orbit_engine::foundation::logging::init();

    let config = match EngineConfig::load_from_file("orrery.toml") {
        Ok(config) => {
            log::info!("loaded configuration from orrery.toml");
            config
        }
        Err(err) => {
            log::info!("using default configuration ({err})");
            EngineConfig::default()
        }
    };
    if let Err(err) = config.validate() {
        log::error!("bad configuration: {err}");
        std::process::exit(1);
    }
    log::info!("starting {}", config.application_name);

    let mut app = match OrreryApp::new(&config) {
        Ok(app) => app,
        Err(err) => {
            log::error!("failed to initialize: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = app.run() {
        log::error!("frame loop failed: {err}");
        std::process::exit(1);
    }
}
