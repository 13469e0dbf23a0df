//! Gesture scripts
//!
//! A script is a JSON list of editor gestures replayed against a fresh
//! board. It drives [`ZoneEditor`] the way the interactive canvas would,
//! one click or key at a time. Coordinates are in mils. Zones are addressed
//! by their position on the board at the time the step runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use zonekit_core::{mils_to_iu, BoardPoint, LayerId, LayerSet, NetCode, ZoneEditError, ZoneId};
use zonekit_editor::{
    AcceptAll, Board, Zone, ZoneEditor, ZoneLayers, ZoneParamsOutcome, ZoneParamsPrompt,
    ZoneSettings, ZoneTool,
};
use zonekit_settings::Config;

/// Script replay error type
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Step {step}: unknown layer '{name}'")]
    UnknownLayer { step: usize, name: String },

    #[error("Step {step}: no zone at board position {index}")]
    NoZoneAt { step: usize, index: usize },

    /// A fatal editor error; the replay stops
    #[error("Step {step}: {source}")]
    Fatal {
        step: usize,
        #[source]
        source: ZoneEditError,
    },
}

/// One editor gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Gesture {
    /// Switch the active layer
    Layer { name: String },
    /// Net proposed by the next parameter prompt
    Net { name: String },
    /// Click of the zone tool
    Begin {
        x: f64,
        y: f64,
        #[serde(default)]
        keepout: bool,
    },
    Move { x: f64, y: f64 },
    End,
    DeleteLastCorner,
    Abort,
    Similar { zone: usize },
    Cutout { zone: usize },
    MoveCorner { zone: usize, corner: usize },
    InsertCorner { zone: usize, edge: usize, x: f64, y: f64 },
    DragEdge { zone: usize, edge: usize, x: f64, y: f64 },
    MoveZone { zone: usize, x: f64, y: f64 },
    EndMove,
    RemoveCorner { zone: usize, corner: usize },
    RemoveContour { zone: usize, corner: usize },
    RemoveZone { zone: usize },
    Duplicate { zone: usize, layer: String },
    /// Opens the parameter prompt of a zone and answers it
    EditParams {
        zone: usize,
        #[serde(default)]
        patch: SettingsPatch,
        #[serde(default)]
        answer: PromptAnswer,
    },
    Fill { zone: usize },
    FillAll,
    Unfill { zone: usize },
    UnfillAll,
    Undo,
    Redo,
}

/// Zone settings changed by a scripted prompt; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub net: Option<String>,
    pub priority: Option<u32>,
    pub clearance_mil: Option<f64>,
    pub min_thickness_mil: Option<f64>,
}

/// Button closing a scripted parameter prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptAnswer {
    #[default]
    Accept,
    Export,
    Abort,
}

/// A replayable list of gestures plus the nets the board starts with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    #[serde(default)]
    pub nets: Vec<String>,
    pub steps: Vec<Gesture>,
}

impl GestureScript {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// A step the editor refused without ending the replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedStep {
    pub step: usize,
    pub message: String,
}

/// Final state of a replayed script
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub zones: Vec<Zone>,
    pub rejected: Vec<RejectedStep>,
    pub warnings: Vec<String>,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

/// Prompt answering with the net and layer the script selected, or with
/// the pending parameter edit when there is one
#[derive(Debug, Default)]
pub struct ScriptPrompt {
    pub net: Option<NetCode>,
    pub layer: Option<LayerId>,
    edit: Option<ParamsEdit>,
}

#[derive(Debug)]
struct ParamsEdit {
    net: Option<NetCode>,
    patch: SettingsPatch,
    answer: PromptAnswer,
}

impl ParamsEdit {
    fn apply(self, initial: &ZoneSettings) -> ZoneParamsOutcome {
        let mut settings = initial.clone();
        if let (Some(net), false) = (self.net, settings.is_keepout()) {
            settings.net = net;
        }
        if let Some(priority) = self.patch.priority {
            settings.priority = priority;
        }
        if let Some(clearance) = self.patch.clearance_mil {
            settings.clearance = mils_to_iu(clearance);
        }
        if let Some(thickness) = self.patch.min_thickness_mil {
            settings.min_thickness = mils_to_iu(thickness);
        }
        match self.answer {
            PromptAnswer::Accept => ZoneParamsOutcome::Accepted(settings),
            PromptAnswer::Export => ZoneParamsOutcome::ExportValues(settings),
            PromptAnswer::Abort => ZoneParamsOutcome::Abort,
        }
    }
}

impl ScriptPrompt {
    fn answer(&mut self, initial: &ZoneSettings) -> ZoneParamsOutcome {
        if let Some(edit) = self.edit.take() {
            return edit.apply(initial);
        }
        let mut settings = initial.clone();
        if let (Some(net), false) = (self.net, settings.is_keepout()) {
            settings.net = net;
        }
        if let Some(layer) = self.layer {
            settings.layers = match settings.layers {
                ZoneLayers::Single(_) => ZoneLayers::Single(layer),
                ZoneLayers::Set(_) => ZoneLayers::Set(LayerSet::single(layer)),
            };
        }
        ZoneParamsOutcome::Accepted(settings)
    }
}

impl ZoneParamsPrompt for ScriptPrompt {
    fn edit_copper(&mut self, _board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome {
        self.answer(initial)
    }

    fn edit_keepout(&mut self, _board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome {
        self.answer(initial)
    }

    fn edit_non_copper(&mut self, _board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome {
        self.answer(initial)
    }
}

type ScriptEditor = ZoneEditor<AcceptAll, ScriptPrompt>;

/// Replays `script` on an empty board configured by `config`
pub fn replay(script: &GestureScript, config: &Config) -> Result<ReplayReport, ScriptError> {
    let mut board = Board::new();
    for name in &script.nets {
        board.nets_mut().add(name);
    }
    let mut editor = ZoneEditor::new(board, config, AcceptAll, ScriptPrompt::default());
    let mut rejected = Vec::new();
    let mut warnings = Vec::new();

    for (step, gesture) in script.steps.iter().enumerate() {
        tracing::debug!("Step {}: {:?}", step, gesture);
        match run_step(&mut editor, step, gesture) {
            Ok(mut step_warnings) => warnings.append(&mut step_warnings),
            Err(StepError::Script(e)) => return Err(e),
            Err(StepError::Edit(e)) if e.is_fatal() => {
                return Err(ScriptError::Fatal { step, source: e });
            }
            Err(StepError::Edit(e)) => {
                tracing::warn!("Step {} rejected: {}", step, e);
                rejected.push(RejectedStep {
                    step,
                    message: e.to_string(),
                });
            }
        }
    }

    if editor.is_active() {
        tracing::info!("Script ended during {}: aborting", editor.state());
        editor
            .abort()
            .map_err(|source| ScriptError::Fatal {
                step: script.steps.len(),
                source,
            })?;
    }

    Ok(ReplayReport {
        zones: editor.board().zones().to_vec(),
        rejected,
        warnings,
        undo_depth: editor.journal().undo_depth(),
        redo_depth: editor.journal().redo_depth(),
    })
}

enum StepError {
    Script(ScriptError),
    Edit(ZoneEditError),
}

impl From<ZoneEditError> for StepError {
    fn from(e: ZoneEditError) -> Self {
        StepError::Edit(e)
    }
}

impl From<ScriptError> for StepError {
    fn from(e: ScriptError) -> Self {
        StepError::Script(e)
    }
}

fn point(x: f64, y: f64) -> BoardPoint {
    BoardPoint::new(mils_to_iu(x), mils_to_iu(y))
}

fn layer(step: usize, name: &str) -> Result<LayerId, ScriptError> {
    name.parse().map_err(|_| ScriptError::UnknownLayer {
        step,
        name: name.to_string(),
    })
}

fn zone_at(editor: &ScriptEditor, step: usize, index: usize) -> Result<ZoneId, ScriptError> {
    editor
        .board()
        .zones()
        .get(index)
        .map(Zone::id)
        .ok_or(ScriptError::NoZoneAt { step, index })
}

/// Runs one gesture and returns its advisory rule warnings
fn run_step(
    editor: &mut ScriptEditor,
    step: usize,
    gesture: &Gesture,
) -> Result<Vec<String>, StepError> {
    let mut warnings = Vec::new();
    match gesture {
        Gesture::Layer { name } => {
            let layer = layer(step, name)?;
            editor.set_active_layer(layer);
        }
        Gesture::Net { name } => {
            let net = editor.board_mut()?.nets_mut().add(name);
            editor.prompt_mut().net = Some(net);
        }
        Gesture::Begin { x, y, keepout } => {
            let tool = if *keepout {
                ZoneTool::Keepout
            } else {
                ZoneTool::Copper
            };
            editor.begin_zone(point(*x, *y), tool)?;
        }
        Gesture::Move { x, y } => editor.on_mouse_move(point(*x, *y))?,
        Gesture::End => {
            if let zonekit_editor::FinishOutcome::Committed(report) = editor.end_zone()? {
                warnings = report.drc_warnings;
            }
        }
        Gesture::DeleteLastCorner => {
            editor.delete_last_corner()?;
        }
        Gesture::Abort => {
            editor.abort()?;
        }
        Gesture::Similar { zone } => {
            let id = zone_at(editor, step, *zone)?;
            editor.add_similar_zone(id)?;
        }
        Gesture::Cutout { zone } => {
            let id = zone_at(editor, step, *zone)?;
            editor.add_zone_cutout(id)?;
        }
        Gesture::MoveCorner { zone, corner } => {
            let id = zone_at(editor, step, *zone)?;
            editor.start_move_corner(id, *corner)?;
        }
        Gesture::InsertCorner { zone, edge, x, y } => {
            let id = zone_at(editor, step, *zone)?;
            editor.insert_corner_and_move(id, *edge, point(*x, *y))?;
        }
        Gesture::DragEdge { zone, edge, x, y } => {
            let id = zone_at(editor, step, *zone)?;
            editor.start_drag_edge(id, *edge, point(*x, *y))?;
        }
        Gesture::MoveZone { zone, x, y } => {
            let id = zone_at(editor, step, *zone)?;
            editor.start_move_zone(id, point(*x, *y))?;
        }
        Gesture::EndMove => warnings = editor.end_move()?.drc_warnings,
        Gesture::RemoveCorner { zone, corner } => {
            let id = zone_at(editor, step, *zone)?;
            if let zonekit_editor::CornerDeleteOutcome::CornerRemoved(report) =
                editor.remove_zone_corner(id, *corner)?
            {
                warnings = report.drc_warnings;
            }
        }
        Gesture::RemoveContour { zone, corner } => {
            let id = zone_at(editor, step, *zone)?;
            editor.delete_zone_contour(id, *corner)?;
        }
        Gesture::RemoveZone { zone } => {
            let id = zone_at(editor, step, *zone)?;
            editor.remove_zone(id)?;
        }
        Gesture::Duplicate { zone, layer: name } => {
            let id = zone_at(editor, step, *zone)?;
            let target = layer(step, name)?;
            editor.prompt_mut().layer = Some(target);
            let result = editor.duplicate_zone(id);
            editor.prompt_mut().layer = None;
            if let Some(report) = result? {
                warnings = report.drc_warnings;
            }
        }
        Gesture::EditParams {
            zone,
            patch,
            answer,
        } => {
            let id = zone_at(editor, step, *zone)?;
            let net = match &patch.net {
                Some(name) => Some(editor.board_mut()?.nets_mut().add(name)),
                None => None,
            };
            editor.prompt_mut().edit = Some(ParamsEdit {
                net,
                patch: patch.clone(),
                answer: *answer,
            });
            let result = editor.edit_zone_params(id);
            editor.prompt_mut().edit = None;
            if let Some(report) = result? {
                warnings = report.drc_warnings;
            }
        }
        Gesture::Fill { zone } => {
            let id = zone_at(editor, step, *zone)?;
            editor.fill_zone(id)?;
        }
        Gesture::FillAll => {
            editor.fill_all()?;
        }
        Gesture::Unfill { zone } => {
            let id = zone_at(editor, step, *zone)?;
            editor.unfill_zone(id)?;
        }
        Gesture::UnfillAll => {
            editor.unfill_all()?;
        }
        Gesture::Undo => {
            editor.undo()?;
        }
        Gesture::Redo => {
            editor.redo()?;
        }
    }
    Ok(warnings)
}
