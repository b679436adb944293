//! Onboarding wizard state machine.
//!
//! A flow walks a fixed, ordered list of steps exactly once. Each step is
//! informational, a single required text field, or a single choice out of a
//! fixed option set. The flow ends either by advancing past the last step
//! (`Completed`) or by skipping (`Skipped`); once ended it never moves again.

use serde::{Deserialize, Serialize};

use crate::error::{LogoGenError, Result};
use crate::models::{AspectRatio, BrandStyle, GenerationDefaults, Palette};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Which accumulator a select step writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectField {
    Style,
    Palette,
    AspectRatio,
}

impl SelectField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Style => BrandStyle::LABEL,
            Self::Palette => Palette::LABEL,
            Self::AspectRatio => AspectRatio::LABEL,
        }
    }

    pub fn options(self) -> Vec<&'static str> {
        match self {
            Self::Style => BrandStyle::options(),
            Self::Palette => Palette::options(),
            Self::AspectRatio => AspectRatio::options(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "field", rename_all = "snake_case")]
pub enum StepKind {
    Info,
    /// The brand-name text field. Advancing is blocked while it is blank.
    Input,
    Select(SelectField),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: StepKind,
}

impl Step {
    const fn info(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            kind: StepKind::Info,
        }
    }
}

pub const INTRO_STEPS: &[Step] = &[
    Step::info(
        "Welcome to LogoGen!",
        "Effortlessly generate modern, professional logos with AI. No design skills required.",
    ),
    Step::info(
        "Unlimited Ideas",
        "Explore endless logo concepts tailored to your brand style and preferences.",
    ),
    Step::info(
        "High-Resolution Downloads",
        "Download crisp, scalable logos ready for web, print, and everywhere you need.",
    ),
    Step::info(
        "Get Started!",
        "Let's create your first logo. It's fast, fun, and free to try!",
    ),
];

pub const BRAND_SETUP_STEPS: &[Step] = &[
    Step::info(
        "Welcome to LogoGen!",
        "Effortlessly generate modern, professional logos with AI. No design skills required.",
    ),
    Step {
        title: "What's your brand name?",
        description: "Enter the name you want to appear in your logo.",
        kind: StepKind::Input,
    },
    Step {
        title: "Pick your style",
        description: "Choose a logo style that fits your brand.",
        kind: StepKind::Select(SelectField::Style),
    },
    Step {
        title: "Choose a color palette",
        description: "Pick a color palette for your logo.",
        kind: StepKind::Select(SelectField::Palette),
    },
    Step {
        title: "Select aspect ratio",
        description: "Choose the shape of your logo.",
        kind: StepKind::Select(SelectField::AspectRatio),
    },
    Step::info("You're ready!", "Let's create your first logo."),
];

// ---------------------------------------------------------------------------
// Flow state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Active,
    Completed,
    Skipped,
}

/// Everything the wizard collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingSelection {
    pub brand_name: String,
    pub style: BrandStyle,
    pub palette: Palette,
    pub aspect_ratio: AspectRatio,
}

impl OnboardingSelection {
    pub fn defaults(&self) -> GenerationDefaults {
        GenerationDefaults {
            style: self.style,
            palette: self.palette,
            aspect_ratio: self.aspect_ratio,
        }
    }
}

/// How a finished flow hands over to the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingOutcome {
    /// Walked to the end; the selection seeds the main screen's defaults.
    Completed(OnboardingSelection),
    /// Bailed out; nothing entered is kept.
    Skipped,
}

impl OnboardingOutcome {
    pub fn defaults(&self) -> GenerationDefaults {
        match self {
            Self::Completed(selection) => selection.defaults(),
            Self::Skipped => GenerationDefaults::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    steps: &'static [Step],
    index: usize,
    selection: OnboardingSelection,
    state: FlowState,
}

impl OnboardingFlow {
    /// Panics on an empty step list; a wizard needs at least one step.
    pub fn new(steps: &'static [Step]) -> Self {
        assert!(!steps.is_empty(), "onboarding flow needs at least one step");
        Self {
            steps,
            index: 0,
            selection: OnboardingSelection::default(),
            state: FlowState::Active,
        }
    }

    pub fn intro() -> Self {
        Self::new(INTRO_STEPS)
    }

    pub fn brand_setup() -> Self {
        Self::new(BRAND_SETUP_STEPS)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != FlowState::Active
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub fn current_step(&self) -> &'static Step {
        &self.steps[self.index]
    }

    pub fn is_last_step(&self) -> bool {
        self.index == self.steps.len() - 1
    }

    /// `(current, total)`, 1-based for display.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.steps.len())
    }

    pub fn selection(&self) -> &OnboardingSelection {
        &self.selection
    }

    pub fn can_advance(&self) -> bool {
        if self.is_finished() {
            return false;
        }
        match self.current_step().kind {
            StepKind::Input => !self.selection.brand_name.trim().is_empty(),
            StepKind::Info | StepKind::Select(_) => true,
        }
    }

    /// Move one step forward, or finish from the last step. A no-op while
    /// the guard on the current step holds.
    pub fn advance(&mut self) -> FlowState {
        if !self.can_advance() {
            return self.state;
        }
        if self.is_last_step() {
            log::debug!("Onboarding completed");
            self.state = FlowState::Completed;
        } else {
            self.index += 1;
        }
        self.state
    }

    /// Bail out from wherever the flow is. Entered values are discarded.
    pub fn skip(&mut self) -> FlowState {
        if !self.is_finished() {
            log::debug!("Onboarding skipped at step {}", self.index);
            self.selection = OnboardingSelection::default();
            self.state = FlowState::Skipped;
        }
        self.state
    }

    pub fn set_brand_name(&mut self, name: impl Into<String>) {
        if !self.is_finished() {
            self.selection.brand_name = name.into();
        }
    }

    /// Choose `option` on the current select step, replacing any earlier
    /// choice for that field.
    pub fn select(&mut self, option: &str) -> Result<()> {
        if self.is_finished() {
            return Err(LogoGenError::Validation("Onboarding has already ended".into()));
        }
        let field = match self.current_step().kind {
            StepKind::Select(field) => field,
            _ => {
                return Err(LogoGenError::Validation(format!(
                    "Step {} does not offer a choice",
                    self.index
                )))
            }
        };
        match field {
            SelectField::Style => self.selection.style = option.parse()?,
            SelectField::Palette => self.selection.palette = option.parse()?,
            SelectField::AspectRatio => self.selection.aspect_ratio = option.parse()?,
        }
        Ok(())
    }

    /// The currently chosen option for a select field.
    pub fn selected(&self, field: SelectField) -> &'static str {
        match field {
            SelectField::Style => self.selection.style.as_str(),
            SelectField::Palette => self.selection.palette.as_str(),
            SelectField::AspectRatio => self.selection.aspect_ratio.as_str(),
        }
    }

    /// `None` while the flow is still running.
    pub fn outcome(&self) -> Option<OnboardingOutcome> {
        match self.state {
            FlowState::Active => None,
            FlowState::Completed => Some(OnboardingOutcome::Completed(self.selection.clone())),
            FlowState::Skipped => Some(OnboardingOutcome::Skipped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_to(flow: &mut OnboardingFlow, index: usize) {
        while flow.index() < index {
            if flow.current_step().kind == StepKind::Input {
                flow.set_brand_name("Acme Corp");
            }
            flow.advance();
        }
    }

    #[test]
    fn test_initial_state() {
        let flow = OnboardingFlow::brand_setup();
        assert_eq!(flow.index(), 0);
        assert_eq!(flow.state(), FlowState::Active);
        assert_eq!(flow.progress(), (1, 6));
        assert_eq!(flow.selection(), &OnboardingSelection::default());
        assert_eq!(flow.selected(SelectField::Style), "Modern");
        assert!(flow.outcome().is_none());
    }

    #[test]
    fn test_input_step_blocks_until_filled() {
        let mut flow = OnboardingFlow::brand_setup();
        flow.advance();
        assert_eq!(flow.current_step().kind, StepKind::Input);

        assert_eq!(flow.advance(), FlowState::Active);
        assert_eq!(flow.index(), 1);

        flow.set_brand_name("   ");
        flow.advance();
        assert_eq!(flow.index(), 1);

        flow.set_brand_name("Acme Corp");
        assert!(flow.can_advance());
        flow.advance();
        assert_eq!(flow.index(), 2);
    }

    #[test]
    fn test_skip_from_any_step_is_terminal() {
        for index in 0..BRAND_SETUP_STEPS.len() {
            let mut flow = OnboardingFlow::brand_setup();
            walk_to(&mut flow, index);
            assert_eq!(flow.index(), index);

            assert_eq!(flow.skip(), FlowState::Skipped);
            assert_eq!(flow.outcome(), Some(OnboardingOutcome::Skipped));
            assert_eq!(flow.selection(), &OnboardingSelection::default());
        }
    }

    #[test]
    fn test_select_overwrites_previous_choice() {
        let mut flow = OnboardingFlow::brand_setup();
        walk_to(&mut flow, 2);

        flow.select("Bold").unwrap();
        flow.select("Retro").unwrap();
        assert_eq!(flow.selection().style, BrandStyle::Retro);

        assert!(flow.select("Neon").is_err());
        assert_eq!(flow.selection().style, BrandStyle::Retro);
    }

    #[test]
    fn test_select_rejected_off_select_steps() {
        let mut flow = OnboardingFlow::brand_setup();
        assert!(flow.select("Bold").is_err());
    }

    #[test]
    fn test_complete_hands_off_selection() {
        let mut flow = OnboardingFlow::brand_setup();
        walk_to(&mut flow, 3);
        flow.select("Pastel").unwrap();
        flow.advance();
        flow.select("16:9").unwrap();
        flow.advance();
        assert!(flow.is_last_step());

        assert_eq!(flow.advance(), FlowState::Completed);
        let outcome = flow.outcome().unwrap();
        let defaults = outcome.defaults();
        assert_eq!(defaults.style, BrandStyle::Modern);
        assert_eq!(defaults.palette, Palette::Pastel);
        assert_eq!(defaults.aspect_ratio, AspectRatio::Widescreen);
        match outcome {
            OnboardingOutcome::Completed(selection) => assert_eq!(selection.brand_name, "Acme Corp"),
            OnboardingOutcome::Skipped => panic!("flow was completed"),
        }
    }

    #[test]
    fn test_no_reentry_after_termination() {
        let mut flow = OnboardingFlow::intro();
        for _ in 0..INTRO_STEPS.len() {
            flow.advance();
        }
        assert_eq!(flow.state(), FlowState::Completed);
        let index = flow.index();

        flow.advance();
        flow.skip();
        flow.set_brand_name("late");
        assert_eq!(flow.state(), FlowState::Completed);
        assert_eq!(flow.index(), index);
        assert_eq!(flow.selection().brand_name, "");

        let fresh = OnboardingFlow::intro();
        assert_eq!(fresh.index(), 0);
    }

    #[test]
    fn test_skip_outcome_uses_default_generation_settings() {
        let mut flow = OnboardingFlow::brand_setup();
        walk_to(&mut flow, 2);
        flow.select("Elegant").unwrap();
        flow.skip();
        assert_eq!(flow.outcome().unwrap().defaults(), GenerationDefaults::default());
    }

    #[test]
    fn test_select_field_options() {
        assert_eq!(SelectField::Palette.options(), vec!["Vibrant", "Muted", "Monochrome", "Pastel"]);
        assert_eq!(SelectField::AspectRatio.label(), "Aspect Ratio");
    }
}
