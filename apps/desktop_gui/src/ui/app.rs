//! App shell: owns the roster view-model, the signup form, and the
//! transient status banner, and reconciles backend events into them.

use std::time::{Duration, Instant};

use client_core::{Roster, RosterCard};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";
const NO_PARTICIPANTS_TEXT: &str = "No participants yet";
const SELECT_ACTIVITY_PROMPT: &str = "-- Select an activity --";
/// Status banners auto-hide this long after they were last (re)shown.
const STATUS_BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
    shown_at: Instant,
}

impl StatusBanner {
    fn expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= STATUS_BANNER_TTL
    }
}

enum CatalogState {
    Loading,
    Failed,
    Ready(Roster),
}

pub struct SignupDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    catalog_state: CatalogState,
    signup_email: String,
    signup_activity: Option<String>,
    status_banner: Option<StatusBanner>,
    queue_status: String,
}

impl SignupDeskApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            catalog_state: CatalogState::Loading,
            signup_email: String::new(),
            signup_activity: None,
            status_banner: None,
            queue_status: String::new(),
        };
        app.request_catalog_load();
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        self.queue_status.clear();
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.queue_status);
    }

    fn request_catalog_load(&mut self) {
        self.catalog_state = CatalogState::Loading;
        self.dispatch(BackendCommand::LoadCatalog);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::CatalogLoaded(catalog) => {
                let roster = Roster::from_catalog(&catalog);
                let selection_still_valid = self
                    .signup_activity
                    .as_deref()
                    .is_some_and(|name| roster.card(name).is_some());
                if !selection_still_valid {
                    self.signup_activity = None;
                }
                self.catalog_state = CatalogState::Ready(roster);
            }
            UiEvent::CatalogLoadFailed => {
                self.catalog_state = CatalogState::Failed;
            }
            UiEvent::SignupConfirmed {
                activity,
                email,
                message,
            } => {
                if let CatalogState::Ready(roster) = &mut self.catalog_state {
                    roster.apply_signup(&activity, &email);
                }
                self.signup_email.clear();
                self.signup_activity = None;
                self.show_banner(StatusBannerSeverity::Success, message);
            }
            UiEvent::SignupFailed { message } => {
                self.show_banner(StatusBannerSeverity::Error, message);
            }
            UiEvent::UnregisterConfirmed { activity, email } => {
                if let CatalogState::Ready(roster) = &mut self.catalog_state {
                    roster.apply_unregister(&activity, &email);
                }
            }
            UiEvent::UnregisterFailed { message } => {
                self.show_banner(StatusBannerSeverity::Error, message);
            }
        }
    }

    fn show_banner(&mut self, severity: StatusBannerSeverity, message: String) {
        self.status_banner = Some(StatusBanner {
            severity,
            message,
            shown_at: Instant::now(),
        });
    }

    fn expire_status_banner(&mut self, now: Instant) {
        if self
            .status_banner
            .as_ref()
            .is_some_and(|banner| banner.expired_at(now))
        {
            self.status_banner = None;
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Success => (
                    egui::Color32::from_rgb(53, 111, 62),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 175, 112)),
                ),
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_roster(&mut self, ui: &mut egui::Ui) {
        let mut reload_requested = false;
        let mut pending_unregister: Option<(String, String)> = None;

        match &self.catalog_state {
            CatalogState::Loading => {
                ui.label("Loading activities...");
            }
            CatalogState::Failed => {
                ui.label(LOAD_FAILURE_TEXT);
                if ui.button("Reload").clicked() {
                    reload_requested = true;
                }
            }
            CatalogState::Ready(roster) => {
                ui.horizontal(|ui| {
                    ui.heading("Activities");
                    if ui.small_button("Reload").clicked() {
                        reload_requested = true;
                    }
                });
                for card in roster.cards() {
                    show_activity_card(ui, card, &mut pending_unregister);
                }
            }
        }

        if reload_requested {
            self.request_catalog_load();
        }
        if let Some((activity, email)) = pending_unregister {
            self.dispatch(BackendCommand::Unregister { activity, email });
        }
    }

    fn show_signup_form(&mut self, ui: &mut egui::Ui) {
        let activity_names: Vec<String> = match &self.catalog_state {
            CatalogState::Ready(roster) => {
                roster.activity_names().map(str::to_string).collect()
            }
            _ => Vec::new(),
        };

        ui.heading("Sign Up for an Activity");
        ui.horizontal(|ui| {
            ui.label("Email:");
            ui.text_edit_singleline(&mut self.signup_email);
        });
        egui::ComboBox::from_label("Activity")
            .selected_text(
                self.signup_activity
                    .as_deref()
                    .unwrap_or(SELECT_ACTIVITY_PROMPT),
            )
            .show_ui(ui, |ui| {
                for name in &activity_names {
                    ui.selectable_value(&mut self.signup_activity, Some(name.clone()), name);
                }
            });

        let form_complete =
            !self.signup_email.trim().is_empty() && self.signup_activity.is_some();
        if ui
            .add_enabled(form_complete, egui::Button::new("Sign Up"))
            .clicked()
        {
            if let Some(activity) = self.signup_activity.clone() {
                let email = self.signup_email.trim().to_string();
                self.dispatch(BackendCommand::Signup { activity, email });
            }
        }
    }
}

fn show_activity_card(
    ui: &mut egui::Ui,
    card: &RosterCard,
    pending_unregister: &mut Option<(String, String)>,
) {
    ui.group(|ui| {
        ui.heading(&card.name);
        ui.label(&card.description);
        ui.label(
            egui::RichText::new(format!("Availability: {} spots left", card.spots_left)).strong(),
        );
        ui.label(format!("Schedule: {}", card.schedule));
        ui.label(egui::RichText::new("Participants:").strong());
        if !card.has_participants() {
            ui.label(egui::RichText::new(NO_PARTICIPANTS_TEXT).weak());
            return;
        }
        for email in &card.participants {
            ui.horizontal(|ui| {
                ui.label(email);
                let remove = ui
                    .small_button("✖")
                    .on_hover_text(format!("Unregister {email} from {}", card.name));
                if remove.clicked() {
                    *pending_unregister = Some((card.name.clone(), email.clone()));
                }
            });
        }
    });
}

impl eframe::App for SignupDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.expire_status_banner(Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Activity Signup Desk");
            if !self.queue_status.is_empty() {
                ui.label(egui::RichText::new(&self.queue_status).weak());
            }
            self.show_status_banner(ui);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_roster(ui);
                ui.separator();
                self.show_signup_form(ui);
            });
        });

        // Keep ticking so queued events drain and banners expire even
        // without user input.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::{ActivityDetails, Catalog, CatalogEntry};

    use super::*;

    fn test_app() -> (
        SignupDeskApp,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        let app = SignupDeskApp::new(cmd_tx, ui_rx);
        (app, cmd_rx, ui_tx)
    }

    fn entry(name: &str, max_participants: u32, participants: &[&str]) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            details: ActivityDetails {
                description: format!("{name} description"),
                schedule: "Wednesdays, 4pm".to_string(),
                max_participants,
                participants: participants.iter().map(|p| p.to_string()).collect(),
            },
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog {
            entries: vec![
                entry("Chess Club", 2, &["alice@example.com"]),
                entry("Drama Society", 5, &[]),
            ],
        }
    }

    fn roster(app: &SignupDeskApp) -> &Roster {
        match &app.catalog_state {
            CatalogState::Ready(roster) => roster,
            _ => panic!("catalog not ready"),
        }
    }

    #[test]
    fn startup_queues_a_single_catalog_load() {
        let (_app, cmd_rx, _ui_tx) = test_app();
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::LoadCatalog)));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn catalog_event_builds_roster_in_server_order() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        ui_tx
            .send(UiEvent::CatalogLoaded(sample_catalog()))
            .expect("send");

        app.process_ui_events();

        let names: Vec<&str> = roster(&app).activity_names().collect();
        assert_eq!(names, ["Chess Club", "Drama Society"]);
        assert_eq!(
            roster(&app).card("Chess Club").map(|c| c.spots_left),
            Some(1)
        );
    }

    #[test]
    fn catalog_failure_replaces_listing() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.apply_event(UiEvent::CatalogLoadFailed);
        assert!(matches!(app.catalog_state, CatalogState::Failed));
    }

    #[test]
    fn confirmed_signup_patches_card_clears_form_and_banners() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.apply_event(UiEvent::CatalogLoaded(sample_catalog()));
        app.signup_email = "bob@example.com".to_string();
        app.signup_activity = Some("Chess Club".to_string());

        app.apply_event(UiEvent::SignupConfirmed {
            activity: "Chess Club".to_string(),
            email: "bob@example.com".to_string(),
            message: "Signed up bob@example.com for Chess Club".to_string(),
        });

        let card = roster(&app).card("Chess Club").expect("card");
        assert_eq!(card.participants, ["alice@example.com", "bob@example.com"]);
        assert_eq!(card.spots_left, 0);
        assert!(app.signup_email.is_empty());
        assert_eq!(app.signup_activity, None);
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.severity, StatusBannerSeverity::Success);
        assert_eq!(banner.message, "Signed up bob@example.com for Chess Club");
    }

    #[test]
    fn failed_signup_leaves_roster_untouched() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.apply_event(UiEvent::CatalogLoaded(sample_catalog()));
        let before = roster(&app).clone();

        app.apply_event(UiEvent::SignupFailed {
            message: "Activity full".to_string(),
        });

        assert_eq!(roster(&app), &before);
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.severity, StatusBannerSeverity::Error);
        assert_eq!(banner.message, "Activity full");
    }

    #[test]
    fn confirmed_unregister_restores_placeholder() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.apply_event(UiEvent::CatalogLoaded(sample_catalog()));

        app.apply_event(UiEvent::UnregisterConfirmed {
            activity: "Chess Club".to_string(),
            email: "alice@example.com".to_string(),
        });

        let card = roster(&app).card("Chess Club").expect("card");
        assert!(!card.has_participants());
        assert_eq!(card.spots_left, 2);
        assert!(app.status_banner.is_none());
    }

    #[test]
    fn reload_drops_selection_of_vanished_activity() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.apply_event(UiEvent::CatalogLoaded(sample_catalog()));
        app.signup_activity = Some("Chess Club".to_string());

        let reduced = Catalog {
            entries: vec![entry("Drama Society", 5, &[])],
        };
        app.apply_event(UiEvent::CatalogLoaded(reduced));
        assert_eq!(app.signup_activity, None);

        app.signup_activity = Some("Drama Society".to_string());
        app.apply_event(UiEvent::CatalogLoaded(sample_catalog()));
        assert_eq!(app.signup_activity.as_deref(), Some("Drama Society"));
    }

    #[test]
    fn banner_expires_after_five_seconds() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.show_banner(StatusBannerSeverity::Success, "done".to_string());
        let shown_at = app.status_banner.as_ref().expect("banner").shown_at;

        app.expire_status_banner(shown_at + Duration::from_millis(4_999));
        assert!(app.status_banner.is_some());

        app.expire_status_banner(shown_at + STATUS_BANNER_TTL);
        assert!(app.status_banner.is_none());
    }

    #[test]
    fn new_banner_supersedes_the_old_one() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.show_banner(StatusBannerSeverity::Error, "first".to_string());
        app.show_banner(StatusBannerSeverity::Success, "second".to_string());

        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.severity, StatusBannerSeverity::Success);
        assert_eq!(banner.message, "second");
    }
}
