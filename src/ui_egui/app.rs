mod tasks;

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use self::tasks::{TaskResult, TaskRunner};
use crate::models::settings::AppConfig;
use crate::services::api::{ApiError, ScheduleApi, UpdateSlotInput};
use crate::services::assignment::{AssignmentService, Mutation, SLOT_DURATION_CHOICES};
use crate::services::board::{BoardState, CellKey, LoadState};
use crate::services::dnd::DragSession;
use crate::services::editor::{item_editor_url, BrowserEditor, ExternalEditor};
use crate::services::invalidation::{InvalidationBus, QueryKey, Subscription};
use crate::ui_egui::dialogs::add_item_dialog::{render_add_item_dialog, AddItemDialogAction, AddItemDialogState};
use crate::ui_egui::drag::DragManager;
use crate::ui_egui::side_panel::{render_side_panel, SidePanelAction, SidePanelState};
use crate::ui_egui::toast::ToastManager;
use crate::ui_egui::views::day_schedule_view::DayScheduleView;

pub struct ScheduleBuilderApp {
    config: AppConfig,
    api: Arc<dyn ScheduleApi>,
    bus: InvalidationBus,
    /// Keys published by mutations and editor completions
    subscription: Subscription,
    assignments: AssignmentService,
    board: BoardState,
    session: DragSession,
    editor: BrowserEditor,
    tasks: TaskRunner,
    toasts: ToastManager,
    side_panel: SidePanelState,
    add_item_dialog: Option<AddItemDialogState>,
}

impl eframe::App for ScheduleBuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_task_results();
        self.handle_invalidations();
        self.handle_focus(ctx);

        DragManager::begin_frame(&mut self.session);

        self.render_top_bar(ctx);

        let side_action = render_side_panel(ctx, &mut self.side_panel, &self.board.unassigned, &mut self.session);
        if side_action == SidePanelAction::Retry {
            self.refetch(QueryKey::UnassignedScheduleItems);
        }

        self.render_board(ctx);
        self.render_add_item_dialog(ctx);

        if let Some(outcome) = DragManager::finish_frame(ctx, &mut self.session) {
            if let Some(mutation) = Mutation::from_outcome(&outcome) {
                self.dispatch(mutation);
            }
        }

        self.toasts.render(ctx);
    }
}

impl ScheduleBuilderApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, api: Arc<dyn ScheduleApi>) -> Result<Self> {
        let mut tasks = TaskRunner::new()?;
        tasks.set_repaint_context(cc.egui_ctx.clone());

        let bus = InvalidationBus::new();
        let subscription = bus.subscribe();
        let assignments = AssignmentService::new(Arc::clone(&api), bus.clone());

        let mut app = Self {
            config,
            api,
            bus,
            subscription,
            assignments,
            board: BoardState::new(),
            session: DragSession::new(),
            editor: BrowserEditor::new(),
            tasks,
            toasts: ToastManager::new(),
            side_panel: SidePanelState::default(),
            add_item_dialog: None,
        };

        for key in QueryKey::ALL {
            app.refetch(key);
        }
        Ok(app)
    }

    fn refetch(&mut self, key: QueryKey) {
        log::debug!("Fetching {}", key);
        let api = Arc::clone(&self.api);
        let conference = self.config.conference_code.clone();

        match key {
            QueryKey::ConferenceSchedule => {
                self.board.mark_schedule_loading();
                self.tasks
                    .spawn(move || TaskResult::Schedule(api.fetch_schedule(&conference)));
            }
            QueryKey::UnassignedScheduleItems => {
                self.board.mark_unassigned_loading();
                self.tasks
                    .spawn(move || TaskResult::Unassigned(api.fetch_unassigned(&conference)));
            }
        }
    }

    fn handle_invalidations(&mut self) {
        for key in self.subscription.drain() {
            self.refetch(key);
        }
    }

    fn handle_focus(&mut self, ctx: &egui::Context) {
        let regained = ctx.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::WindowFocused(true)))
        });
        if regained && self.editor.pending_count() > 0 {
            self.editor.notify_focus_regained();
        }
    }

    fn handle_task_results(&mut self) {
        for result in self.tasks.drain() {
            match result {
                TaskResult::Schedule(Ok(schedule)) => {
                    log::info!(
                        "Loaded schedule with {} day(s), {} placed item(s)",
                        schedule.days.len(),
                        schedule.days.iter().map(|day| day.item_count()).sum::<usize>()
                    );
                    self.board.set_schedule(LoadState::Loaded(schedule));
                }
                TaskResult::Schedule(Err(err)) => {
                    self.query_failed(QueryKey::ConferenceSchedule, err);
                }
                TaskResult::Unassigned(Ok(items)) => {
                    log::info!("Loaded {} unassigned item(s)", items.len());
                    self.board.unassigned = LoadState::Loaded(items);
                }
                TaskResult::Unassigned(Err(err)) => {
                    self.query_failed(QueryKey::UnassignedScheduleItems, err);
                }
                TaskResult::Mutation { mutation, cell, result } => {
                    if let Some(cell) = &cell {
                        self.board.finish_assignment(cell);
                    }
                    if let Mutation::MoveItem { item_id } = &mutation {
                        self.board.finish_unassignment(item_id);
                    }
                    if let Err(err) = result {
                        self.toasts
                            .error(format!("{} failed: {}", mutation.describe(), err));
                    }
                }
                TaskResult::SlotAdded { day, duration, result } => match result {
                    Ok(()) => self
                        .toasts
                        .success(format!("Added {} minute slot to {}", duration, day.format("%A"))),
                    Err(err) => self.toasts.error(format!("Could not add slot: {}", err)),
                },
            }
        }
    }

    /// A refetch that fails keeps the last good data on screen.
    fn query_failed(&mut self, key: QueryKey, err: ApiError) {
        log::warn!("{} query failed: {}", key, err);
        match key {
            QueryKey::ConferenceSchedule if self.board.schedule.loaded().is_some() => {
                self.toasts.error(format!("Could not refresh schedule: {}", err));
            }
            QueryKey::ConferenceSchedule => {
                self.board.set_schedule(LoadState::Failed(err.to_string()));
            }
            QueryKey::UnassignedScheduleItems if self.board.unassigned.loaded().is_some() => {
                self.toasts
                    .error(format!("Could not refresh unassigned items: {}", err));
            }
            QueryKey::UnassignedScheduleItems => {
                self.board.unassigned = LoadState::Failed(err.to_string());
            }
        }
    }

    fn dispatch(&mut self, mutation: Mutation) {
        let cell = match &mutation {
            Mutation::UpdateSlot(input) => input
                .rooms
                .first()
                .map(|room| CellKey::new(input.slot_id.clone(), room.clone())),
            Mutation::MoveItem { .. } => None,
        };
        if let Some(cell) = &cell {
            self.board.begin_assignment(cell.clone());
        }
        if let Mutation::MoveItem { item_id } = &mutation {
            self.board.begin_unassignment(item_id);
        }

        log::info!("{}", mutation.describe());
        let service = self.assignments.clone();
        self.tasks.spawn(move || {
            let result = service.run(&mutation);
            TaskResult::Mutation { mutation, cell, result }
        });
    }

    fn add_slot(&mut self, day: NaiveDate, duration: u32) {
        let service = self.assignments.clone();
        let conference = self.config.conference_code.clone();
        self.tasks.spawn(move || TaskResult::SlotAdded {
            day,
            duration,
            result: service.add_slot(&conference, day, duration),
        });
    }

    fn open_editor(&mut self, item_id: &str) {
        let url = item_editor_url(&self.config.admin_base_url, item_id);
        let bus = self.bus.clone();
        let on_close = Box::new(move || {
            bus.publish(QueryKey::ConferenceSchedule);
        });

        match self.editor.open(&url, on_close) {
            Ok(()) => self.toasts.info("Editor opened in your browser"),
            Err(err) => {
                log::warn!("{:#}", err);
                self.toasts.error(format!("{:#}", err));
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let mut select = None;
        let mut add_slot = None;
        let mut refresh = false;

        egui::TopBottomPanel::top("schedule_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&self.config.conference_code);
                ui.separator();

                if let Some(schedule) = self.board.schedule.loaded() {
                    let selected = self.board.selected_day_index();
                    for (index, day) in schedule.days.iter().enumerate() {
                        if ui.selectable_label(index == selected, day.label()).clicked() {
                            select = Some(index);
                        }
                    }
                }

                if let Some(day) = self.board.selected_day() {
                    let day = day.day;
                    ui.menu_button("Add slot", |ui| {
                        for duration in SLOT_DURATION_CHOICES {
                            if ui.button(format!("{} minutes", duration)).clicked() {
                                add_slot = Some((day, duration));
                                ui.close_menu();
                            }
                        }
                    });
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⟳ Refresh").clicked() {
                        refresh = true;
                    }
                    if self.board.has_pending_mutations() || self.board.schedule.is_loading() {
                        ui.spinner();
                    }
                });
            });
        });

        if let Some(index) = select {
            self.board.select_day(index);
        }
        if let Some((day, duration)) = add_slot {
            self.add_slot(day, duration);
        }
        if refresh {
            for key in QueryKey::ALL {
                self.refetch(key);
            }
        }
    }

    fn render_board(&mut self, ctx: &egui::Context) {
        let mut retry = false;
        let mut interaction = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let LoadState::Failed(message) = &self.board.schedule {
                ui.colored_label(ui.visuals().error_fg_color, format!("Could not load schedule: {}", message));
                if ui.button("Retry").clicked() {
                    retry = true;
                }
                return;
            }
            if self.board.schedule.loaded().is_none() {
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            interaction = Some(DayScheduleView::show(ui, &mut self.board, &mut self.session));
        });

        if retry {
            self.refetch(QueryKey::ConferenceSchedule);
        }
        if let Some(interaction) = interaction {
            if let Some(target) = interaction.open_add_dialog {
                self.add_item_dialog = Some(AddItemDialogState::new(target));
            }
            if let Some(item_id) = interaction.edit_item {
                self.open_editor(&item_id);
            }
        }
    }

    fn render_add_item_dialog(&mut self, ctx: &egui::Context) {
        let Some(state) = self.add_item_dialog.as_mut() else {
            return;
        };

        match render_add_item_dialog(ctx, state, &self.board.unassigned) {
            AddItemDialogAction::None => {}
            AddItemDialogAction::Close => self.add_item_dialog = None,
            AddItemDialogAction::Assign { item, cell } => {
                self.add_item_dialog = None;
                let input = UpdateSlotInput::for_drop(&item, &cell.slot_id, &cell.room_id);
                self.dispatch(Mutation::UpdateSlot(input));
            }
        }
    }
}
