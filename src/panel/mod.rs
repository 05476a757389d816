//! The tweak panel: live editing of every light, the shared material and the
//! point light animation.
//!
//! [`draw_panel`] only edits a [`PanelState`] and reports what changed; the
//! demo decides what to upload.

pub mod bindings;

use cgmath::Point3;

use crate::{
    data_structures::model::MaterialParams,
    lights::{Color, LightRig, RectAreaLight},
    panel::bindings::{LookAtTarget, Range},
};

/// Everything the panel can edit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelState {
    pub rig: LightRig,
    pub material: MaterialParams,
    pub animate_point_light: bool,
}

/// What a frame of panel interaction changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelResponse {
    pub rig_changed: bool,
    pub material_changed: bool,
}

impl PanelResponse {
    pub fn any(&self) -> bool {
        self.rig_changed || self.material_changed
    }
}

fn slider(ui: &mut egui::Ui, value: &mut f32, range: Range, label: &str) -> bool {
    let changed = ui
        .add(
            egui::Slider::new(value, range.min..=range.max)
                .step_by(range.step as f64)
                .text(label),
        )
        .changed();
    if changed {
        *value = range.apply(*value);
    }
    changed
}

fn position(ui: &mut egui::Ui, point: &mut Point3<f32>) -> bool {
    let mut changed = false;
    changed |= slider(ui, &mut point.x, bindings::POSITION, "x");
    changed |= slider(ui, &mut point.y, bindings::POSITION, "y");
    changed |= slider(ui, &mut point.z, bindings::POSITION, "z");
    changed
}

fn color(ui: &mut egui::Ui, color: &mut Color, label: &str) -> bool {
    ui.horizontal(|ui| {
        let changed = ui.color_edit_button_srgb(&mut color.srgb).changed();
        ui.label(label);
        changed
    })
    .inner
}

fn toggles(ui: &mut egui::Ui, visible: &mut bool, helper: Option<&mut bool>) -> bool {
    ui.horizontal(|ui| {
        let mut changed = ui.checkbox(visible, "visible").changed();
        if let Some(helper) = helper {
            changed |= ui.checkbox(helper, "helper").changed();
        }
        changed
    })
    .inner
}

fn look_at_buttons(ui: &mut egui::Ui, light: &mut RectAreaLight) -> bool {
    ui.horizontal(|ui| {
        ui.label("look at");
        let mut changed = false;
        for target in LookAtTarget::ALL {
            if ui.button(target.label()).clicked() {
                light.look_at(target.point());
                changed = true;
            }
        }
        changed
    })
    .inner
}

fn rig_sections(ui: &mut egui::Ui, rig: &mut LightRig) -> bool {
    let mut changed = false;
    let helpers = &mut rig.helpers;

    egui::CollapsingHeader::new("Ambient light").show(ui, |ui| {
        let light = &mut rig.ambient;
        changed |= toggles(ui, &mut light.visible, None);
        changed |= color(ui, &mut light.color, "color");
        changed |= slider(ui, &mut light.intensity, bindings::INTENSITY, "intensity");
    });

    egui::CollapsingHeader::new("Directional light").show(ui, |ui| {
        let light = &mut rig.directional;
        changed |= toggles(ui, &mut light.visible, Some(&mut helpers.directional));
        changed |= ui.checkbox(&mut light.cast_shadow, "cast shadow").changed();
        changed |= color(ui, &mut light.color, "color");
        changed |= slider(ui, &mut light.intensity, bindings::INTENSITY, "intensity");
        changed |= position(ui, &mut light.position);
    });

    egui::CollapsingHeader::new("Hemisphere light").show(ui, |ui| {
        let light = &mut rig.hemisphere;
        changed |= toggles(ui, &mut light.visible, Some(&mut helpers.hemisphere));
        changed |= color(ui, &mut light.sky_color, "sky");
        changed |= color(ui, &mut light.ground_color, "ground");
        changed |= slider(ui, &mut light.intensity, bindings::INTENSITY, "intensity");
        changed |= position(ui, &mut light.position);
    });

    egui::CollapsingHeader::new("Point light").show(ui, |ui| {
        let light = &mut rig.point;
        changed |= toggles(ui, &mut light.visible, Some(&mut helpers.point));
        changed |= color(ui, &mut light.color, "color");
        changed |= slider(ui, &mut light.intensity, bindings::INTENSITY, "intensity");
        changed |= slider(ui, &mut light.distance, bindings::DISTANCE, "distance");
        changed |= slider(ui, &mut light.decay, bindings::DECAY, "decay");
        changed |= position(ui, &mut light.position);
    });

    egui::CollapsingHeader::new("Rect area light").show(ui, |ui| {
        let light = &mut rig.rect_area;
        changed |= toggles(ui, &mut light.visible, Some(&mut helpers.rect_area));
        changed |= color(ui, &mut light.color, "color");
        changed |= slider(ui, &mut light.intensity, bindings::INTENSITY, "intensity");
        changed |= slider(ui, &mut light.width, bindings::SIZE, "width");
        changed |= slider(ui, &mut light.height, bindings::SIZE, "height");
        let mut moved = light.position;
        if position(ui, &mut moved) {
            light.move_to(moved);
            changed = true;
        }
        changed |= look_at_buttons(ui, light);
    });

    egui::CollapsingHeader::new("Spot light").show(ui, |ui| {
        let light = &mut rig.spot;
        changed |= toggles(ui, &mut light.visible, Some(&mut helpers.spot));
        changed |= color(ui, &mut light.color, "color");
        changed |= slider(ui, &mut light.intensity, bindings::INTENSITY, "intensity");
        changed |= slider(ui, &mut light.distance, bindings::DISTANCE, "distance");
        changed |= slider(ui, &mut light.angle, bindings::ANGLE, "angle");
        changed |= slider(ui, &mut light.penumbra, bindings::PENUMBRA, "penumbra");
        changed |= slider(ui, &mut light.decay, bindings::DECAY, "decay");
        changed |= position(ui, &mut light.position);
    });

    changed
}

fn material_section(ui: &mut egui::Ui, material: &mut MaterialParams) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new("Material").show(ui, |ui| {
        changed |= slider(ui, &mut material.roughness, bindings::ROUGHNESS, "roughness");
        changed |= slider(ui, &mut material.metalness, bindings::METALNESS, "metalness");
    });
    changed
}

/// Draw the panel into `ctx` and apply edits to `state`.
pub fn draw_panel(ctx: &egui::Context, state: &mut PanelState) -> PanelResponse {
    let mut response = PanelResponse::default();
    egui::Window::new("Lights")
        .default_pos([12.0, 12.0])
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                response.rig_changed |= rig_sections(ui, &mut state.rig);
                response.material_changed |= material_section(ui, &mut state.material);
                ui.separator();
                if ui
                    .checkbox(&mut state.animate_point_light, "animate point light")
                    .changed()
                {
                    log::debug!("Point light animation: {}", state.animate_point_light);
                }
            });
        });
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn run_frames(state: &mut PanelState, frames: usize) -> PanelResponse {
        let ctx = egui::Context::default();
        let mut response = PanelResponse::default();
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                let frame = draw_panel(ctx, state);
                response.rig_changed |= frame.rig_changed;
                response.material_changed |= frame.material_changed;
            });
        }
        response
    }

    #[test]
    fn panel_draws_headlessly_without_edits() {
        let mut state = PanelState::default();
        let response = run_frames(&mut state, 3);
        assert!(!response.any());
        assert_eq!(state, PanelState::default());
    }

    fn input(time: f64, events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(640.0, 480.0),
            )),
            time: Some(time),
            events,
            ..Default::default()
        }
    }

    fn primary(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    /// One frame of the look-at row alone, returning its change flag and rect.
    fn look_at_frame(
        ctx: &egui::Context,
        input: egui::RawInput,
        light: &mut RectAreaLight,
    ) -> (bool, egui::Rect) {
        let mut changed = false;
        let mut row = egui::Rect::NOTHING;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.scope(|ui| look_at_buttons(ui, light));
                changed |= response.inner;
                row = response.response.rect;
            });
        });
        (changed, row)
    }

    #[test]
    fn clicking_look_at_turns_the_rect_area_light() {
        let ctx = egui::Context::default();
        let mut light = LightRig::default().rect_area;
        let (changed, row) = look_at_frame(&ctx, input(0.0, vec![]), &mut light);
        assert!(!changed);
        assert!(row.width() > 0.0);

        // buttons run left to right, so the first hit from the right is the ring
        let mut time = 1.0;
        let mut x = row.right() - 1.0;
        let mut rig_changed = false;
        while x > row.left() && !rig_changed {
            let pos = egui::pos2(x, row.center().y);
            let down = vec![egui::Event::PointerMoved(pos), primary(pos, true)];
            look_at_frame(&ctx, input(time, down), &mut light);
            let up = vec![primary(pos, false)];
            rig_changed = look_at_frame(&ctx, input(time + 0.05, up), &mut light).0;
            time += 1.0;
            x -= 2.0;
        }
        assert!(rig_changed);
        let expected = (LookAtTarget::Ring.point() - light.position).normalize();
        assert!((light.normal() - expected).magnitude() < 1e-5);
        assert_eq!(light.position, LightRig::default().rect_area.position);
    }

    #[test]
    fn response_reports_any_change() {
        let response = PanelResponse {
            rig_changed: false,
            material_changed: true,
        };
        assert!(response.any());
        assert!(!PanelResponse::default().any());
    }
}
