use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId, WindowLevel},
};

use rand::rngs::StdRng;

use std::{num::NonZeroU32, sync::Arc, time::Instant};

use crate::data::{Error, Program, RefreshRateMode, CAP_MILLI_HZ};
use crate::field::ParticleField;
use crate::graphics::Canvas;
use crate::schedule::PacedScheduler;

type WindowSurface = Surface<Arc<Window>, Arc<Window>>;

type Field = ParticleField<Canvas, PacedScheduler, StdRng>;

struct WindowState {
    prog: Program,
    window: Option<Arc<Window>>,
    surface: Option<WindowSurface>,
    field: Field,
    background: u32,
    final_buffer_size: PhysicalSize<u32>,
    hidden: bool,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        self.prog.print_startup_info();

        let config = &self.prog.config.window;

        let window_attributes = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_window_level(WindowLevel::AlwaysOnBottom);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Unable to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        // The layer sits behind everything and must not swallow clicks.
        if config.passthrough {
            if let Err(err) = window.set_cursor_hittest(false) {
                log::warn!("Mouse pass-through is unavailable: {err}");
            }
        }

        if self.prog.refresh_rate_mode() != RefreshRateMode::Specified {
            Self::check_refresh_rate(&window, &mut self.prog);
        }

        self.field
            .scheduler_mut()
            .set_interval(self.prog.refresh_rate());

        let size = window.inner_size();
        self.final_buffer_size = size;

        self.surface = Context::new(window.clone())
            .and_then(|context| Surface::new(&context, window.clone()))
            .inspect_err(|err| log::warn!("Unable to acquire a drawing surface: {err}"))
            .ok();

        if let Some(surface) = self.surface.as_mut() {
            Self::resize_surface(surface, size.width, size.height);
        }

        let canvas = self.surface.as_ref().map(|_| {
            let mut canvas = Canvas::new(size.width as usize, size.height as usize);
            canvas.set_background(self.background);
            canvas
        });

        self.field.mount(canvas);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.field.unmount();
                event_loop.exit();
            }

            WindowEvent::Occluded(b) => {
                self.hidden = b;
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.field
                    .request_resize(width as usize, height as usize, Instant::now());
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => {
                        self.field.unmount();
                        event_loop.exit();
                    }

                    Key::Character("r") => {
                        self.field.regenerate();
                        log::info!("Regenerated {} particles.", self.field.pool().len());
                    }

                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(token) = self.field.scheduler_mut().take_due(Instant::now()) {
                    self.field.on_frame(token);
                }

                self.present();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if let Some((w, h)) = self.field.poll_resize(now) {
            if let Some(surface) = self.surface.as_mut() {
                Self::resize_surface(surface, w as u32, h as u32);
            }
            self.final_buffer_size = PhysicalSize::new(w as u32, h as u32);
        }

        let frame = match self.hidden {
            true => None,
            false => self.field.scheduler().deadline(),
        };

        if let (Some(deadline), Some(window)) = (frame, self.window.as_ref()) {
            if deadline <= now {
                window.request_redraw();
            }
        }

        let wake = [frame.filter(|&d| d > now), self.field.resize_deadline()]
            .into_iter()
            .flatten()
            .min();

        event_loop.set_control_flow(match wake {
            Some(t) => ControlFlow::WaitUntil(t),
            None => ControlFlow::Wait,
        });
    }
}

impl WindowState {
    fn present(&mut self) {
        let (Some(window), Some(surface), Some(canvas)) = (
            self.window.as_ref(),
            self.surface.as_mut(),
            self.field.surface(),
        ) else {
            return;
        };

        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(err) => {
                log::error!("Unable to get the window buffer: {err}");
                return;
            }
        };

        canvas.present_to(&mut buffer, self.final_buffer_size.width as usize);

        window.pre_present_notify();
        if let Err(err) = buffer.present() {
            log::error!("Failing to present buffers to the window: {err}");
        }
    }

    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            log::debug!("Skipping surface resize to an empty size.");
            return;
        };

        if let Err(err) = surface.resize(w, h) {
            log::error!("Failed to resize surface buffer: {err}");
        }
    }

    fn check_refresh_rate(window: &Window, prog: &mut Program) {
        let Some(mut milli_hz) = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
        else {
            log::warn!(
                "Unable to query the monitor's refresh rate, using {}hz.",
                prog.milli_hz() as f32 / 1000.0
            );
            return;
        };

        log::info!("Detected refresh rate {}hz.", milli_hz as f32 / 1000.0);

        if milli_hz > CAP_MILLI_HZ {
            milli_hz = CAP_MILLI_HZ;
            log::info!("Refresh rate has been capped to {}hz.", CAP_MILLI_HZ / 1000);
        }

        prog.change_fps_frac(milli_hz);
    }
}

pub fn winit_main(prog: Program) -> Result<(), Error> {
    let background = prog.config.window.background_argb()?;

    let field = ParticleField::new(
        PacedScheduler::new(prog.refresh_rate()),
        prog.field_rng(),
        prog.config.field.clone(),
    );

    let event_loop = EventLoop::new()?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        field,
        background,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        hidden: false,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut state)?;

    Ok(())
}
