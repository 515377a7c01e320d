// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application session: screens, saved projects and command dispatch.
//!
//! The session is the single owner of editor state. UI code produces
//! [`Command`]s; [`Session::dispatch`] applies them and returns a typed
//! result, and [`Session::handle`] decides whether a failure is only logged
//! or also shown to the user.

use crate::commands::{ActionTable, Command};
use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::io::serialization::{
    export_frame_png, export_project, import_project, with_project_extension,
};
use crate::io::storage::{ProjectStore, SavedProject};
use crate::models::project::Project;
use crate::playback::clock::Clock;
use crate::playback::driver::{FrameScheduler, PlaybackLoop, Tick};
use crate::render::{self, raster::FontBook, FrameReport, Surface};
use std::collections::HashSet;
use std::time::Duration;

/// Top-level views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    Import,
    Editor,
}

/// Tracks which screen is visible.
#[derive(Debug, Default)]
pub struct ScreenManager {
    current: Screen,
}

impl ScreenManager {
    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn show(&mut self, screen: Screen) {
        if self.current != screen {
            log::debug!("Screen {:?} -> {:?}", self.current, screen);
            self.current = screen;
        }
    }
}

/// Everything the running application owns.
pub struct Session {
    editor: Editor,
    store: ProjectStore,
    screens: ScreenManager,
    playback: PlaybackLoop<Box<dyn Clock>>,
    actions: ActionTable,
    /// Faces used for exported frames.
    fonts: FontBook,
    saved: Vec<SavedProject>,
    save_modal_open: bool,
    notice: Option<String>,
    /// Objects whose paint failure has already been reported.
    reported_failures: HashSet<String>,
    /// Bumped whenever a different project becomes live.
    generation: u64,
}

impl Session {
    pub fn new(config: &EditorConfig, clock: Box<dyn Clock>) -> Self {
        let mut session = Self {
            editor: Editor::new(config.canvas.clone()),
            store: ProjectStore::new(&config.storage.directory),
            screens: ScreenManager::default(),
            playback: PlaybackLoop::new(clock),
            actions: ActionTable::default(),
            fonts: FontBook::from_files(&config.fonts),
            saved: Vec::new(),
            save_modal_open: false,
            notice: None,
            reported_failures: HashSet::new(),
            generation: 0,
        };
        log::info!("Project store: {}", session.store.path().display());
        let listed = session.refresh_saved();
        session.handle(listed);
        session.playback.refresh_display(session.editor.time());
        session
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn saved_projects(&self) -> &[SavedProject] {
        &self.saved
    }

    pub fn save_modal_open(&self) -> bool {
        self.save_modal_open
    }

    pub fn time_display(&self) -> &str {
        self.playback.time_display()
    }

    /// Frames drawn by the playback loop so far.
    pub fn frames_rendered(&self) -> u64 {
        self.playback.frames_rendered()
    }

    /// Message waiting to be shown to the user.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Changes each time a new or loaded project replaces the live one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn now(&self) -> Duration {
        self.playback.clock().now()
    }

    /// Resolve a named action and dispatch its command.
    pub fn run_action(
        &mut self,
        action: &str,
        scheduler: &mut dyn FrameScheduler,
    ) -> EditorResult<()> {
        let command = self.actions.resolve(action)?;
        self.dispatch(command, scheduler)
    }

    /// Apply one command.
    pub fn dispatch(
        &mut self,
        command: Command,
        scheduler: &mut dyn FrameScheduler,
    ) -> EditorResult<()> {
        match command {
            Command::NewProject => {
                self.stop_playback();
                let now = self.now();
                self.editor.new_project(now);
                self.enter_editor();
            }
            Command::ShowScreen(screen) => {
                if screen == Screen::Start {
                    self.refresh_saved()?;
                }
                self.screens.show(screen);
            }
            Command::BackToStart => {
                self.stop_playback();
                self.save_modal_open = false;
                self.screens.show(Screen::Start);
                self.refresh_saved()?;
            }
            Command::TogglePlayback => {
                self.playback.toggle(self.editor.time_mut(), scheduler);
            }
            Command::Play => {
                self.playback.start(self.editor.time_mut(), scheduler);
            }
            Command::Pause => self.stop_playback(),
            Command::Seek(time) => {
                let now = self.now();
                self.editor.seek(time, now);
                self.playback.refresh_display(self.editor.time());
            }
            Command::AddMaterial(material) => {
                self.editor.add_material(material);
            }
            Command::AddImage(path) => {
                self.editor.add_image(&path)?;
            }
            Command::SetMode(mode) => self.editor.set_mode(mode),
            Command::Select(id) => self.editor.select(id),
            Command::Rename(name) => self.editor.rename(name),
            Command::OpenSaveModal => self.save_modal_open = true,
            Command::CloseSaveModal => self.save_modal_open = false,
            Command::SaveToStore => {
                let id = self.store.save(self.editor.project_mut_for_save())?;
                self.save_modal_open = false;
                self.refresh_saved()?;
                self.notice = Some(format!("Saved \"{}\"", self.editor.project().name));
                log::info!("Project saved to store as {}", id);
            }
            Command::DownloadProject(path) => {
                let path = with_project_extension(path);
                export_project(self.editor.project(), &path)?;
                self.save_modal_open = false;
                log::info!("Exported project to {}", path.display());
            }
            Command::ImportProject(path) => {
                let project = import_project(&path)?;
                self.replace_project(project)?;
                log::info!("Imported project from {}", path.display());
            }
            Command::LoadSaved(id) => {
                let saved = self
                    .store
                    .load(&id)?
                    .ok_or_else(|| {
                        EditorError::storage(format!("no saved project with id {}", id))
                    })?;
                self.replace_project(saved.data)?;
            }
            Command::DeleteSaved(id) => {
                if !self.store.delete(&id)? {
                    log::warn!("Saved project {} was already gone", id);
                }
                self.refresh_saved()?;
            }
            Command::ExportFrame(path) => {
                let editor = &self.editor;
                let report = export_frame_png(
                    editor.project(),
                    editor.current_time(),
                    editor.assets(),
                    &self.fonts,
                    &path,
                )?;
                log::info!(
                    "Exported frame at {:.3}s to {} ({} painted, {} skipped)",
                    report.time,
                    path.display(),
                    report.painted,
                    report.failures.len()
                );
            }
        }
        Ok(())
    }

    /// Apply the log-or-surface policy to a dispatch result.
    pub fn handle(&mut self, result: EditorResult<()>) {
        let Err(err) = result else {
            return;
        };
        if err.is_log_only() {
            log::warn!("[bind-miss] {}", err);
        } else {
            log::error!("{}", err);
            self.notice = Some(err.to_string());
        }
    }

    /// Draw the current frame, advancing time when playing.
    pub fn render_frame(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameReport {
        let (time, project, assets) = self.editor.frame_parts();
        let report = match self.playback.tick(time, project, assets, surface, scheduler) {
            Tick::Rendered(report) => report,
            Tick::Stopped => render::draw(surface, project, time.current_time(), assets),
        };

        for failure in &report.failures {
            if self.reported_failures.insert(failure.object_id.clone()) {
                log::warn!("Object {} could not be drawn: {}", failure.object_id, failure.error);
            }
        }
        report
    }

    /// Make `data` the live project. Playback keeps running if it is rejected.
    fn replace_project(&mut self, data: Project) -> EditorResult<()> {
        let project = Project::replace(data)?;
        self.stop_playback();
        let now = self.now();
        self.editor.load_project(project, now)?;
        self.enter_editor();
        Ok(())
    }

    fn stop_playback(&mut self) {
        self.playback.stop(self.editor.time_mut());
    }

    fn enter_editor(&mut self) {
        self.generation += 1;
        self.reported_failures.clear();
        self.save_modal_open = false;
        self.playback.refresh_display(self.editor.time());
        self.screens.show(Screen::Editor);
    }

    fn refresh_saved(&mut self) -> EditorResult<()> {
        self.saved = self.store.list()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditMode;
    use crate::models::{color::Color, material::Material, object::SceneObject, project::Project};
    use crate::playback::clock::ManualClock;
    use crate::render::raster::PixelSurface;
    use std::path::PathBuf;

    #[derive(Default)]
    struct CountingScheduler {
        requests: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) {
            self.requests += 1;
        }
    }

    struct Fixture {
        dir: PathBuf,
        clock: ManualClock,
        session: Session,
        scheduler: CountingScheduler,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("hikari-session-{}", uuid::Uuid::new_v4()));
            let mut config = EditorConfig::default();
            config.storage.directory = dir.join("store");
            let clock = ManualClock::new();
            let session = Session::new(&config, Box::new(clock.clone()));
            Self {
                dir,
                clock,
                session,
                scheduler: CountingScheduler::default(),
            }
        }

        fn dispatch(&mut self, command: Command) -> EditorResult<()> {
            self.session.dispatch(command, &mut self.scheduler)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn test_new_project_enters_editor() {
        let mut fx = Fixture::new();
        assert_eq!(fx.session.screen(), Screen::Start);
        fx.dispatch(Command::NewProject).unwrap();
        assert_eq!(fx.session.screen(), Screen::Editor);
        assert_eq!(fx.session.time_display(), "0:00 / 0:30");
        assert_eq!(fx.session.generation(), 1);
    }

    #[test]
    fn test_unknown_action_is_logged_not_surfaced() {
        let mut fx = Fixture::new();
        let result = fx.session.run_action("missing-button", &mut fx.scheduler);
        assert!(matches!(result, Err(EditorError::BindingMissing { .. })));
        fx.session.handle(result);
        assert_eq!(fx.session.notice(), None);
    }

    #[test]
    fn test_actions_drive_the_editor() {
        let mut fx = Fixture::new();
        fx.session.run_action("new-project", &mut fx.scheduler).unwrap();
        fx.session.run_action("add-rect", &mut fx.scheduler).unwrap();
        fx.session.run_action("object-mode", &mut fx.scheduler).unwrap();
        assert_eq!(fx.session.editor().project().objects.len(), 1);
        assert_eq!(fx.session.editor().mode(), EditMode::Object);

        fx.session.run_action("play-pause", &mut fx.scheduler).unwrap();
        assert!(fx.session.editor().time().is_playing());
        assert_eq!(fx.scheduler.requests, 1);
    }

    #[test]
    fn test_playing_session_renders_advancing_frames() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        fx.dispatch(Command::Play).unwrap();
        let mut surface = PixelSurface::new(32, 18);

        fx.clock.advance_secs(1.5);
        let report = fx.session.render_frame(&mut surface, &mut fx.scheduler);
        assert!((report.time - 1.5).abs() < 1e-9);
        assert_eq!(fx.session.time_display(), "0:01 / 0:30");
        assert_eq!(fx.session.frames_rendered(), 1);

        fx.dispatch(Command::Pause).unwrap();
        fx.clock.advance_secs(3.0);
        let requests = fx.scheduler.requests;
        let report = fx.session.render_frame(&mut surface, &mut fx.scheduler);
        assert!((report.time - 1.5).abs() < 1e-9);
        assert_eq!(fx.scheduler.requests, requests);
    }

    #[test]
    fn test_save_to_store_and_load_back() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        fx.dispatch(Command::Rename("Stored".to_string())).unwrap();
        fx.dispatch(Command::AddMaterial(Material::Circle)).unwrap();
        fx.dispatch(Command::OpenSaveModal).unwrap();
        fx.dispatch(Command::SaveToStore).unwrap();

        assert!(!fx.session.save_modal_open());
        assert_eq!(fx.session.saved_projects().len(), 1);
        let id = fx.session.saved_projects()[0].id.clone();
        assert_eq!(fx.session.editor().project().id.as_deref(), Some(id.as_str()));

        fx.dispatch(Command::BackToStart).unwrap();
        fx.dispatch(Command::NewProject).unwrap();
        assert!(fx.session.editor().project().objects.is_empty());

        fx.dispatch(Command::LoadSaved(id)).unwrap();
        assert_eq!(fx.session.editor().project().name, "Stored");
        assert_eq!(fx.session.editor().project().objects.len(), 1);
        assert_eq!(fx.session.screen(), Screen::Editor);
    }

    #[test]
    fn test_loading_missing_saved_project_is_surfaced() {
        let mut fx = Fixture::new();
        let result = fx.dispatch(Command::LoadSaved("project_nope".to_string()));
        assert!(matches!(result, Err(EditorError::StorageFailure(_))));
        fx.session.handle(result);
        assert!(fx.session.notice().is_some());
    }

    #[test]
    fn test_malformed_import_keeps_live_project() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        fx.dispatch(Command::AddMaterial(Material::Text)).unwrap();
        let before = fx.session.editor().project().clone();

        std::fs::create_dir_all(&fx.dir).unwrap();
        let path = fx.dir.join("broken.hmv");
        std::fs::write(&path, r#"{ "width": 0, "objects": [] }"#).unwrap();

        let result = fx.dispatch(Command::ImportProject(path));
        assert!(matches!(result, Err(EditorError::MalformedInput(_))));
        assert_eq!(fx.session.editor().project(), &before);
    }

    #[test]
    fn test_rejected_load_keeps_playback_running() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        fx.dispatch(Command::Play).unwrap();

        std::fs::create_dir_all(&fx.dir).unwrap();
        let path = fx.dir.join("broken.hmv");
        std::fs::write(&path, r#"{ "width": 0, "objects": [] }"#).unwrap();
        assert!(fx.dispatch(Command::ImportProject(path)).is_err());
        assert!(fx.session.editor().time().is_playing());

        let mut corrupt = Project::new(100, 100, 24.0, 5.0);
        corrupt.duration = -1.0;
        let id = fx.session.store.save(&mut corrupt).unwrap();
        let result = fx.dispatch(Command::LoadSaved(id));
        assert!(matches!(result, Err(EditorError::MalformedInput(_))));
        assert!(fx.session.editor().time().is_playing());

        fx.clock.advance_secs(2.0);
        let mut surface = PixelSurface::new(16, 9);
        let report = fx.session.render_frame(&mut surface, &mut fx.scheduler);
        assert!((report.time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_download_then_import() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        fx.dispatch(Command::AddMaterial(Material::Rectangle)).unwrap();
        std::fs::create_dir_all(&fx.dir).unwrap();

        fx.dispatch(Command::DownloadProject(fx.dir.join("show"))).unwrap();
        let written = fx.dir.join("show.hmv");
        assert!(written.exists());

        let mut other = Project::new(100, 100, 24.0, 5.0).with_name("Other");
        other.add_object(SceneObject::circle(Color::WHITE, 1.0), 0.0);
        fx.session.editor.load_project(other, Duration::ZERO).unwrap();

        fx.dispatch(Command::ImportProject(written)).unwrap();
        assert_eq!(fx.session.editor().project().width, 1920);
        assert_eq!(fx.session.editor().project().objects.len(), 1);
    }

    #[test]
    fn test_delete_saved() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        fx.dispatch(Command::SaveToStore).unwrap();
        let id = fx.session.saved_projects()[0].id.clone();

        fx.dispatch(Command::DeleteSaved(id)).unwrap();
        assert!(fx.session.saved_projects().is_empty());
    }

    #[test]
    fn test_failing_object_is_reported_but_frame_continues() {
        let mut fx = Fixture::new();
        fx.dispatch(Command::NewProject).unwrap();
        let mut project = Project::new(20, 20, 30.0, 10.0);
        project.add_object(SceneObject::image("missing.png", 10.0, 10.0), 0.0);
        project.add_object(SceneObject::rectangle(Color::WHITE, 20.0, 20.0), 0.0);
        fx.session.editor.load_project(project, Duration::ZERO).unwrap();

        let mut surface = PixelSurface::new(20, 20);
        let report = fx.session.render_frame(&mut surface, &mut fx.scheduler);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.painted, 1);
        assert_eq!(fx.session.reported_failures.len(), 1);
        assert_eq!(surface.pixel(10, 10), Color::WHITE);
    }
}
