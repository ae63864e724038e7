//! Interactive session state without a window.
//!
//! An [`Explorer`] holds everything a host loop would otherwise keep in
//! locals: the selected function and rule, the interval, the partition
//! count, the view and the canvas size. The host translates its input into
//! [`Action`]s, applies them, and calls [`Explorer::frame`] once per frame.

use crate::config::{Config, IntegrationConfig, ViewConfig};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::function::Function;
use crate::output::SvgEncoder;
use crate::plot::IntegralPlot;
use crate::quadrature::{QuadratureEngine, QuadratureRule};
use crate::render::DrawSurface;
use crate::viewport::{Axis, ViewTransform, Viewport};
use log::debug;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Input already decoded by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Pointer drag by a device delta.
    Drag {
        /// Horizontal delta in pixels.
        dx: f64,
        /// Vertical delta in pixels.
        dy: f64,
    },
    /// Wheel movement with the modifier state at the time.
    Scroll {
        /// Horizontal wheel notches.
        wheel_x: f64,
        /// Vertical wheel notches.
        wheel_y: f64,
        /// Control held: zoom instead of pan.
        ctrl: bool,
        /// Shift held: vertical wheel acts on the x axis.
        shift: bool,
    },
    /// Restore the configured scale.
    ResetScale,
    /// Number key pressed.
    Key(u8),
    /// Select a rule directly.
    SelectRule(QuadratureRule),
    /// Select a function, applying its preset interval if it has one.
    SelectFunction(Function),
    /// Set the interval; both bounds are clamped to the configured limits.
    SetBounds {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Set the partition count.
    SetPartitions(usize),
    /// Canvas resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

/// A running Riemann-sum exploration session.
#[derive(Debug, Clone)]
pub struct Explorer<R = Xoshiro256PlusPlus> {
    engine: QuadratureEngine<R>,
    plot: IntegralPlot,
    view: ViewConfig,
    limits: IntegrationConfig,
    transform: ViewTransform,
    width: u32,
    height: u32,
    function: Function,
    lower: f64,
    upper: f64,
    partitions: usize,
    rule: QuadratureRule,
}

impl Explorer<Xoshiro256PlusPlus> {
    /// Start a session from `config`.
    ///
    /// The random rule is seeded from `integration.seed` when present.
    ///
    /// # Errors
    ///
    /// Fails when the configured partition count or canvas size is zero.
    pub fn new(config: &Config) -> Result<Self> {
        let engine = match config.integration.seed {
            Some(seed) => QuadratureEngine::seeded(seed),
            None => QuadratureEngine::from_entropy(),
        };
        Self::with_engine(config, engine)
    }
}

impl<R: Rng> Explorer<R> {
    /// Start a session around an existing engine.
    ///
    /// # Errors
    ///
    /// Fails when the configured partition count or canvas size is zero.
    pub fn with_engine(config: &Config, engine: QuadratureEngine<R>) -> Result<Self> {
        config.validate()?;
        let integration = &config.integration;
        let mut explorer = Self {
            engine,
            plot: IntegralPlot::new(config.style.clone()),
            view: config.view,
            limits: *integration,
            transform: config.view.initial_transform(),
            width: config.canvas.width,
            height: config.canvas.height,
            function: integration.function,
            lower: integration.clamp_bound(integration.lower),
            upper: integration.clamp_bound(integration.upper),
            partitions: integration.partitions,
            rule: integration.rule,
        };
        explorer.select_function(integration.function);
        Ok(explorer)
    }

    /// Apply one host action.
    ///
    /// # Errors
    ///
    /// Rejects a zero partition count or an empty canvas, leaving the
    /// session unchanged.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Drag { dx, dy } => self.transform.pan(dx, dy),
            Action::Scroll {
                wheel_x,
                wheel_y,
                ctrl,
                shift,
            } => self.scroll(wheel_x, wheel_y, ctrl, shift),
            Action::ResetScale => self.transform.reset_scale(self.view.initial_scale()),
            Action::Key(key) => {
                if let Some(rule) = QuadratureRule::from_key(key) {
                    self.rule = rule;
                }
            }
            Action::SelectRule(rule) => self.rule = rule,
            Action::SelectFunction(function) => self.select_function(function),
            Action::SetBounds { lower, upper } => {
                self.lower = self.limits.clamp_bound(lower);
                self.upper = self.limits.clamp_bound(upper);
            }
            Action::SetPartitions(partitions) => {
                if partitions == 0 {
                    return Err(Error::InvalidPartitionCount { partitions });
                }
                self.partitions = partitions;
            }
            Action::Resize { width, height } => {
                if width == 0 || height == 0 {
                    return Err(Error::InvalidDimensions { width, height });
                }
                self.width = width;
                self.height = height;
            }
        }
        Ok(())
    }

    fn scroll(&mut self, wheel_x: f64, wheel_y: f64, ctrl: bool, shift: bool) {
        if ctrl {
            let axis = if shift { Axis::Y } else { Axis::X };
            if wheel_y > 0.0 {
                self.transform.zoom(axis, self.view.zoom_in, self.view.scale_bounds);
            } else if wheel_y < 0.0 {
                self.transform.zoom(axis, self.view.zoom_out, self.view.scale_bounds);
            }
            return;
        }

        let step = self.view.pan_step;
        if shift {
            self.transform.pan(wheel_x * step - wheel_y * step, 0.0);
        } else {
            self.transform.pan(wheel_x * step, wheel_y * step);
        }
    }

    fn select_function(&mut self, function: Function) {
        self.function = function;
        if let Some((lower, upper)) = function.preset_interval() {
            debug!("{function} presets the interval to [{lower:.6}, {upper:.6}]");
            self.lower = lower;
            self.upper = upper;
        }
    }

    /// Integrate the current tuple and draw one frame onto `surface`.
    ///
    /// Returns the estimate shown in the summary.
    ///
    /// # Errors
    ///
    /// Propagates integration errors.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> Result<f64> {
        let viewport = self.viewport();
        let function = self.function;
        let result = self.engine.integrate(
            &function,
            self.lower,
            self.upper,
            self.partitions,
            self.rule,
        )?;
        self.plot.render_frame(surface, &function, Some(result), &viewport);
        Ok(result.estimate())
    }

    /// Render the current frame into a fresh framebuffer.
    ///
    /// # Errors
    ///
    /// Fails if the framebuffer cannot be allocated or integration fails.
    pub fn render_raster(&mut self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.plot.style().background);
        self.frame(&mut fb)?;
        Ok(fb)
    }

    /// Render the current frame as an SVG document.
    ///
    /// # Errors
    ///
    /// Propagates integration errors.
    pub fn render_svg(&mut self) -> Result<SvgEncoder> {
        let mut svg =
            SvgEncoder::new(self.width, self.height).background(Some(self.plot.style().background));
        self.frame(&mut svg)?;
        Ok(svg)
    }

    /// The transform bound to the current canvas size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.transform, self.width, self.height)
    }

    /// Current pan and zoom.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Selected function.
    #[must_use]
    pub fn function(&self) -> Function {
        self.function
    }

    /// Current interval.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Current partition count.
    #[must_use]
    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Selected rule.
    #[must_use]
    pub fn rule(&self) -> QuadratureRule {
        self.rule
    }

    /// The engine and its cache.
    #[must_use]
    pub fn engine(&self) -> &QuadratureEngine<R> {
        &self.engine
    }
}
