//! `Session`：对上层（CLI/GUI）提供的搜索框会话对象。
//!
//! `Session` 自身不做业务判断，而是：
//! - 持有 pill 容器（状态）
//! - 持有 processors 链
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `SearchState` + `Action`

use crate::{
    container::{PillContainer, PillList},
    engine::Engine,
    error::Result,
    event::{Action, InputEvent},
    model::{Pill, SearchState},
    processor::{
        EditingProcessor, EngineFacade, EnterPillProcessor, LoadProcessor, ProcessStatus,
        Processor, SubmitProcessor,
    },
    resolver::{Decorations, Resolver},
    tokenizer::Tokenizer,
};

pub struct Session<R, T> {
    engine: Engine<R, T>,
    pills: PillList<Pill>,
    processors: Vec<Box<dyn Processor>>,
}

impl<R, T> Session<R, T>
where
    R: Resolver + Decorations,
    T: Tokenizer,
{
    pub fn new(engine: Engine<R, T>) -> Self {
        Self {
            engine,
            pills: PillList::new(),
            processors: vec![
                Box::new(LoadProcessor),
                Box::new(EditingProcessor),
                Box::new(EnterPillProcessor),
                Box::new(SubmitProcessor),
            ],
        }
    }

    pub fn engine(&self) -> &Engine<R, T> {
        &self.engine
    }

    pub fn state(&self) -> SearchState {
        SearchState {
            pills: self.pills.items().to_vec(),
            text: self.pills.text().to_string(),
            search_string: self.engine.current_search_string(&self.pills),
        }
    }

    /// 处理一个输入事件，返回最新快照与动作列表。
    pub fn handle(&mut self, ev: InputEvent) -> Result<(SearchState, Vec<Action>)> {
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&self.engine, &mut self.pills, &ev)?;
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        Ok((self.state(), actions))
    }
}
