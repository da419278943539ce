//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，修改 pill 容器，并可产生 `Action`（Search/Shake）。
//!
//! 默认链路（`Session::new` 组装）：
//! - `LoadProcessor`：整体载入搜索串并 reconcile
//! - `EditingProcessor`：编辑文本（Text/Backspace/Clear）
//! - `EnterPillProcessor`：回车把文本转成 pill
//! - `SubmitProcessor`：提交搜索

use crate::{
    container::{PillContainer, PillList},
    error::Result,
    event::{Action, InputEvent},
    model::{Pill, Reconciled},
    reconciler::ShakeSignal,
    serializer::full_search_string,
};

/// 给 processors 的对象安全引擎接口。
pub trait EngineFacade {
    /// parse + reconcile
    fn load(
        &self,
        search_string: &str,
        container: &mut dyn PillContainer<Pill>,
        signal: &mut dyn ShakeSignal,
    ) -> Result<Reconciled>;
    /// 文本 -> pill；`None` 表示文本中有非法条件
    fn create_item(&self, search_string: &str) -> Option<Pill>;
    fn current_search_string(&self, container: &dyn PillContainer<Pill>) -> String;
}

/// Processor 执行结果：是否“消费”了本次事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        pills: &mut PillList<Pill>,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)>;
}

pub struct LoadProcessor;

impl Processor for LoadProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        pills: &mut PillList<Pill>,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        let InputEvent::Load(search_string) = input_event else {
            return Ok((ProcessStatus::Continue, Vec::new()));
        };
        let mut actions: Vec<Action> = Vec::new();
        engine.load(search_string, pills, &mut || actions.push(Action::Shake))?;
        Ok((ProcessStatus::Consume, actions))
    }
}

/// 编辑文本（替换/退格/清空）。
pub struct EditingProcessor;

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        pills: &mut PillList<Pill>,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        match input_event {
            InputEvent::Text(text) => {
                pills.set_text(text);
                Ok((ProcessStatus::Consume, Vec::new()))
            }
            InputEvent::Backspace => {
                if pills.text().is_empty() {
                    pills.pop();
                } else {
                    let mut text: String = pills.text().to_string();
                    text.pop();
                    pills.set_text(&text);
                }
                Ok((ProcessStatus::Consume, Vec::new()))
            }
            InputEvent::Clear => {
                pills.clear();
                pills.clear_text();
                Ok((ProcessStatus::Consume, Vec::new()))
            }
            _ => Ok((ProcessStatus::Continue, Vec::new())),
        }
    }
}

pub struct EnterPillProcessor;

impl Processor for EnterPillProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        pills: &mut PillList<Pill>,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        if *input_event != InputEvent::Enter {
            return Ok((ProcessStatus::Continue, Vec::new()));
        }
        let text: String = pills.text().trim().to_string();
        if text.is_empty() {
            return Ok((ProcessStatus::Consume, Vec::new()));
        }
        if pills.append_value(&text, &|s| engine.create_item(s)) {
            pills.clear_text();
            Ok((ProcessStatus::Consume, Vec::new()))
        } else {
            Ok((ProcessStatus::Consume, vec![Action::Shake]))
        }
    }
}

pub struct SubmitProcessor;

impl Processor for SubmitProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        pills: &mut PillList<Pill>,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        match input_event {
            InputEvent::Submit => Ok((
                ProcessStatus::Consume,
                vec![Action::Search(full_search_string(pills))],
            )),
            _ => Ok((ProcessStatus::Continue, Vec::new())),
        }
    }
}
