//! In-memory platform and graphics API for unit tests.
//!
//! Both fakes hand out a shared `Rc<RefCell<..>>` state so tests can script
//! behaviour before handing the fake over and inspect it afterwards.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::coords::PixelRect;
use crate::device::{
    ClearFlags, CooperativeLevel, GraphicsApi, PresentOutcome, RenderDevice, RenderState,
    SwapChainConfig,
};
use crate::paint::Color;
use crate::window::{Message, Platform, ShowCommand, WindowParams};

// ── platform ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OsCall {
    RegisterClass(String),
    UnregisterClass(String),
    CreateWindow(u32),
    DestroyWindow(u32),
    Show(u32, ShowCommand),
    Update(u32),
}

#[derive(Default)]
pub(crate) struct OsState {
    classes: HashSet<String>,
    windows: HashSet<u32>,
    next_handle: u32,
    fail_create: Option<u32>,
    last_error: u32,
    last_params: Option<WindowParams>,

    script: VecDeque<Vec<Message>>,
    queue: VecDeque<Message>,

    journal: Vec<OsCall>,
    dispatched: usize,
    quits_posted: usize,
}

impl OsState {
    /// Each inner vector is what one drain will see. Once the script runs out
    /// every drain yields a quit, so loops under test always terminate.
    pub(crate) fn script(&mut self, batches: Vec<Vec<Message>>) {
        self.script = batches.into();
    }

    pub(crate) fn fail_window_creation(&mut self, code: u32) {
        self.fail_create = Some(code);
    }

    pub(crate) fn live_windows(&self) -> usize {
        self.windows.len()
    }

    pub(crate) fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub(crate) fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub(crate) fn last_created_params(&self) -> Option<WindowParams> {
        self.last_params
    }

    pub(crate) fn journal(&self) -> &[OsCall] {
        &self.journal
    }

    pub(crate) fn shows(&self) -> usize {
        self.journal.iter().filter(|c| matches!(c, OsCall::Show(..))).count()
    }

    pub(crate) fn updates(&self) -> usize {
        self.journal.iter().filter(|c| matches!(c, OsCall::Update(_))).count()
    }

    pub(crate) fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub(crate) fn quits_posted(&self) -> usize {
        self.quits_posted
    }
}

pub(crate) type FakeOs = Rc<RefCell<OsState>>;

pub(crate) struct FakePlatform {
    os: FakeOs,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self { os: Rc::new(RefCell::new(OsState::default())) }
    }

    pub(crate) fn os(&self) -> FakeOs {
        Rc::clone(&self.os)
    }
}

impl Platform for FakePlatform {
    type Handle = u32;

    fn register_class(&mut self, class_name: &str) -> bool {
        let mut os = self.os.borrow_mut();
        os.journal.push(OsCall::RegisterClass(class_name.to_owned()));
        os.classes.insert(class_name.to_owned())
    }

    fn unregister_class(&mut self, class_name: &str) {
        let mut os = self.os.borrow_mut();
        os.journal.push(OsCall::UnregisterClass(class_name.to_owned()));
        os.classes.remove(class_name);
    }

    fn create_window(&mut self, class_name: &str, _title: &str, params: &WindowParams) -> Option<u32> {
        let mut os = self.os.borrow_mut();
        assert!(os.classes.contains(class_name), "window created before its class");

        if let Some(code) = os.fail_create {
            os.last_error = code;
            return None;
        }

        os.next_handle += 1;
        let handle = os.next_handle;
        os.windows.insert(handle);
        os.last_params = Some(*params);
        os.journal.push(OsCall::CreateWindow(handle));
        Some(handle)
    }

    fn last_error(&self) -> u32 {
        self.os.borrow().last_error
    }

    fn destroy_window(&mut self, handle: u32) {
        let mut os = self.os.borrow_mut();
        assert!(os.windows.remove(&handle), "double destroy of window {handle}");
        os.journal.push(OsCall::DestroyWindow(handle));
    }

    fn show_window(&mut self, handle: &u32, cmd: ShowCommand) {
        self.os.borrow_mut().journal.push(OsCall::Show(*handle, cmd));
    }

    fn update_window(&mut self, handle: &u32) {
        self.os.borrow_mut().journal.push(OsCall::Update(*handle));
    }

    fn pump(&mut self) {
        let mut os = self.os.borrow_mut();
        let batch = os.script.pop_front().unwrap_or_else(|| vec![Message::Quit(0)]);
        os.queue.extend(batch);
    }

    fn poll_message(&mut self) -> Option<Message> {
        self.os.borrow_mut().queue.pop_front()
    }

    fn dispatch_message(&mut self, _message: &Message) {
        self.os.borrow_mut().dispatched += 1;
    }

    fn post_quit(&mut self, exit_code: i32) {
        let mut os = self.os.borrow_mut();
        os.quits_posted += 1;
        os.queue.push_back(Message::Quit(exit_code));
    }
}

// ── graphics ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClearCall {
    pub rects: Vec<PixelRect>,
    pub flags: ClearFlags,
    pub color: Color,
    pub depth: f32,
    pub stencil: u32,
}

/// Shared journal and script for [`FakeApi`] and the devices it creates.
#[derive(Default)]
pub(crate) struct GpuLog {
    pub fail_factory: bool,
    pub fail_device: bool,
    pub fail_reset: bool,

    /// Per-frame results of `begin_scene`; `true` once exhausted.
    pub begin_script: VecDeque<bool>,
    /// Per-frame present outcome and the cooperative level reported after it;
    /// `(Presented, Ok)` once exhausted.
    pub present_script: VecDeque<(PresentOutcome, CooperativeLevel)>,

    pub factories_created: u32,
    pub devices_created: u32,
    pub resets: u32,
    pub last_target: Option<u32>,
    pub last_config: Option<SwapChainConfig>,

    pub states: Vec<(RenderState, bool)>,
    pub clears: Vec<ClearCall>,
    /// Ordered device calls, plus anything tests push (e.g. "render").
    pub calls: Vec<&'static str>,
    pub released: Vec<&'static str>,
}

pub(crate) type FakeGpu = Rc<RefCell<GpuLog>>;

pub(crate) struct FakeApi {
    gpu: FakeGpu,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self { gpu: Rc::new(RefCell::new(GpuLog::default())) }
    }

    pub(crate) fn gpu(&self) -> FakeGpu {
        Rc::clone(&self.gpu)
    }
}

pub(crate) struct FakeFactory {
    pub id: u32,
    gpu: FakeGpu,
}

impl Drop for FakeFactory {
    fn drop(&mut self) {
        self.gpu.borrow_mut().released.push("factory");
    }
}

pub(crate) struct FakeDevice {
    gpu: FakeGpu,
    level: CooperativeLevel,
}

impl FakeDevice {
    pub(crate) fn gpu(&self) -> &FakeGpu {
        &self.gpu
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.gpu.borrow_mut().released.push("device");
    }
}

impl GraphicsApi for FakeApi {
    type Target = u32;
    type Factory = FakeFactory;
    type Device = FakeDevice;

    fn create_factory(&mut self) -> Option<FakeFactory> {
        let mut gpu = self.gpu.borrow_mut();
        if gpu.fail_factory {
            return None;
        }
        gpu.factories_created += 1;
        Some(FakeFactory { id: gpu.factories_created, gpu: Rc::clone(&self.gpu) })
    }

    fn create_device(
        &mut self,
        _factory: &FakeFactory,
        target: &u32,
        config: &SwapChainConfig,
    ) -> anyhow::Result<FakeDevice> {
        let mut gpu = self.gpu.borrow_mut();
        anyhow::ensure!(!gpu.fail_device, "no hardware device for window {target}");
        gpu.devices_created += 1;
        gpu.last_target = Some(*target);
        gpu.last_config = Some(config.clone());
        Ok(FakeDevice { gpu: Rc::clone(&self.gpu), level: CooperativeLevel::Ok })
    }
}

impl RenderDevice for FakeDevice {
    fn set_render_state(&mut self, state: RenderState, enabled: bool) {
        let mut gpu = self.gpu.borrow_mut();
        gpu.states.push((state, enabled));
        gpu.calls.push("set_render_state");
    }

    fn clear(&mut self, rects: &[PixelRect], flags: ClearFlags, color: Color, depth: f32, stencil: u32) {
        let mut gpu = self.gpu.borrow_mut();
        gpu.clears.push(ClearCall { rects: rects.to_vec(), flags, color, depth, stencil });
        gpu.calls.push("clear");
    }

    fn begin_scene(&mut self) -> bool {
        let mut gpu = self.gpu.borrow_mut();
        gpu.calls.push("begin_scene");
        gpu.begin_script.pop_front().unwrap_or(true)
    }

    fn end_scene(&mut self) {
        self.gpu.borrow_mut().calls.push("end_scene");
    }

    fn present(&mut self) -> PresentOutcome {
        let mut gpu = self.gpu.borrow_mut();
        gpu.calls.push("present");
        let (outcome, level) = gpu
            .present_script
            .pop_front()
            .unwrap_or((PresentOutcome::Presented, CooperativeLevel::Ok));
        self.level = level;
        outcome
    }

    fn test_cooperative_level(&self) -> CooperativeLevel {
        self.level
    }

    fn reset(&mut self, config: &SwapChainConfig) -> anyhow::Result<()> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.calls.push("reset");
        anyhow::ensure!(!gpu.fail_reset, "reset refused");
        gpu.resets += 1;
        gpu.last_config = Some(config.clone());
        self.level = CooperativeLevel::Ok;
        Ok(())
    }
}
