//! Pointer input as discrete commands.
//!
//! [`PointerController`] turns raw pointer events into [`Command`]s for the
//! engine plus [`EngineEvent`]s for the consumer. It never touches simulation
//! state itself, so gestures can be tested without an engine.

use crate::layout::view::Point;
use crate::layout::view::ViewTransform;

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Pointer left the surface
    Leave,
    Wheel {
        position: Point,
        delta_y: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Hold a node at a world position
    PinNode {
        id: String,
        position: Point,
    },
    /// Hand a node back to the simulation
    Unpin {
        id: String,
    },
    /// Raise the energy target and resume ticking
    InjectEnergy,
    /// Drop the energy target so the layout cools again
    ReleaseEnergy,
    Pan {
        dx: f64,
        dy: f64,
    },
    Zoom {
        anchor: Point,
        factor: f64,
    },
    ShowTooltip {
        id: String,
        pointer: Point,
    },
    HideTooltip,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    NodeSelected(String),
    /// Pointer entered a node (`Some`) or left the last hovered one (`None`)
    NodeHovered(Option<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerOutcome {
    pub commands: Vec<Command>,
    pub events: Vec<EngineEvent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    DraggingNode {
        id: String,
        origin: Point,
        moved: bool,
    },
    Panning {
        last: Point,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PointerController {
    gesture: Gesture,
    hovered: Option<String>,
    click_distance: f64,
    wheel_zoom_rate: f64,
}

impl PointerController {
    pub fn new(
        click_distance: f64,
        wheel_zoom_rate: f64,
    ) -> Self {
        Self {
            gesture: Gesture::Idle,
            hovered: None,
            click_distance,
            wheel_zoom_rate,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::DraggingNode { .. })
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Forget any gesture in progress and the hovered node
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.hovered = None;
    }

    /// Translate one pointer event. `hit` maps a screen point to the id of the node under it.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        transform: &ViewTransform,
        hit: impl Fn(Point) -> Option<String>,
    ) -> PointerOutcome {
        let mut outcome = PointerOutcome::default();

        match event {
            PointerEvent::Down(pointer) => match hit(pointer) {
                Some(id) => {
                    outcome.commands.push(Command::PinNode {
                        id: id.clone(),
                        position: transform.invert(pointer),
                    });
                    outcome.commands.push(Command::InjectEnergy);
                    self.gesture = Gesture::DraggingNode {
                        id,
                        origin: pointer,
                        moved: false,
                    };
                },
                None => {
                    self.gesture = Gesture::Panning { last: pointer };
                },
            },
            PointerEvent::Move(pointer) => match &mut self.gesture {
                Gesture::DraggingNode { id, origin, moved } => {
                    if origin.distance_to(pointer) > self.click_distance {
                        *moved = true;
                    }
                    outcome.commands.push(Command::PinNode {
                        id: id.clone(),
                        position: transform.invert(pointer),
                    });
                },
                Gesture::Panning { last } => {
                    outcome.commands.push(Command::Pan {
                        dx: pointer.x - last.x,
                        dy: pointer.y - last.y,
                    });
                    *last = pointer;
                },
                Gesture::Idle => self.hover(hit(pointer), pointer, &mut outcome),
            },
            PointerEvent::Up(pointer) => match std::mem::take(&mut self.gesture) {
                Gesture::DraggingNode { id, origin, moved } => {
                    let moved = moved || origin.distance_to(pointer) > self.click_distance;
                    outcome.commands.push(Command::Unpin { id: id.clone() });
                    outcome.commands.push(Command::ReleaseEnergy);
                    if !moved && hit(pointer).as_deref() == Some(id.as_str()) {
                        outcome.events.push(EngineEvent::NodeSelected(id));
                    }
                },
                Gesture::Panning { .. } | Gesture::Idle => {},
            },
            PointerEvent::Leave => {
                if let Gesture::DraggingNode { id, .. } = std::mem::take(&mut self.gesture) {
                    outcome.commands.push(Command::Unpin { id });
                    outcome.commands.push(Command::ReleaseEnergy);
                }
                self.hover(None, Point::default(), &mut outcome);
            },
            PointerEvent::Wheel { position, delta_y } => {
                outcome.commands.push(Command::Zoom {
                    anchor: position,
                    factor: 2f64.powf(-delta_y * self.wheel_zoom_rate),
                });
            },
        }

        outcome
    }

    fn hover(
        &mut self,
        target: Option<String>,
        pointer: Point,
        outcome: &mut PointerOutcome,
    ) {
        match &target {
            Some(id) => outcome.commands.push(Command::ShowTooltip {
                id: id.clone(),
                pointer,
            }),
            None if self.hovered.is_some() => outcome.commands.push(Command::HideTooltip),
            None => {},
        }

        if self.hovered != target {
            outcome.events.push(EngineEvent::NodeHovered(target.clone()));
            self.hovered = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // One node "N" occupying the square [0, 10) x [0, 10) on screen
    fn hit(p: Point) -> Option<String> {
        (p.x >= 0.0 && p.x < 10.0 && p.y >= 0.0 && p.y < 10.0).then(|| "N".to_string())
    }

    fn controller() -> PointerController {
        PointerController::new(0.0, 0.002)
    }

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let mut pointer = controller();
        let t = ViewTransform::IDENTITY;

        let down = pointer.handle(PointerEvent::Down(Point::new(5.0, 5.0)), &t, hit);
        assert_eq!(
            down.commands,
            vec![
                Command::PinNode {
                    id: "N".to_string(),
                    position: Point::new(5.0, 5.0)
                },
                Command::InjectEnergy
            ]
        );
        assert!(pointer.is_dragging());

        let up = pointer.handle(PointerEvent::Up(Point::new(5.0, 5.0)), &t, hit);
        assert_eq!(
            up.commands,
            vec![
                Command::Unpin {
                    id: "N".to_string()
                },
                Command::ReleaseEnergy
            ]
        );
        assert_eq!(up.events, vec![EngineEvent::NodeSelected("N".to_string())]);
        assert!(!pointer.is_dragging());
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut pointer = controller();
        let t = ViewTransform::IDENTITY;

        pointer.handle(PointerEvent::Down(Point::new(5.0, 5.0)), &t, hit);
        let moved = pointer.handle(PointerEvent::Move(Point::new(8.0, 6.0)), &t, hit);
        assert_eq!(
            moved.commands,
            vec![Command::PinNode {
                id: "N".to_string(),
                position: Point::new(8.0, 6.0)
            }]
        );

        let up = pointer.handle(PointerEvent::Up(Point::new(5.0, 5.0)), &t, hit);
        assert!(up.events.is_empty());
        assert_eq!(up.commands.len(), 2);
    }

    #[test]
    fn drag_positions_are_in_world_space() {
        let mut pointer = controller();
        let t = ViewTransform {
            scale: 2.0,
            translate: Point::new(4.0, 0.0),
        };

        let down = pointer.handle(PointerEvent::Down(Point::new(6.0, 8.0)), &t, hit);
        assert_eq!(
            down.commands[0],
            Command::PinNode {
                id: "N".to_string(),
                position: Point::new(1.0, 4.0)
            }
        );
    }

    #[test]
    fn background_drag_pans() {
        let mut pointer = controller();
        let t = ViewTransform::IDENTITY;

        pointer.handle(PointerEvent::Down(Point::new(50.0, 50.0)), &t, hit);
        let first = pointer.handle(PointerEvent::Move(Point::new(60.0, 45.0)), &t, hit);
        let second = pointer.handle(PointerEvent::Move(Point::new(61.0, 45.0)), &t, hit);

        assert_eq!(first.commands, vec![Command::Pan { dx: 10.0, dy: -5.0 }]);
        assert_eq!(second.commands, vec![Command::Pan { dx: 1.0, dy: 0.0 }]);
        assert!(pointer.handle(PointerEvent::Up(Point::new(61.0, 45.0)), &t, hit).events.is_empty());
    }

    #[test]
    fn hover_shows_and_hides_tooltip() {
        let mut pointer = controller();
        let t = ViewTransform::IDENTITY;

        let enter = pointer.handle(PointerEvent::Move(Point::new(2.0, 2.0)), &t, hit);
        assert_eq!(enter.events, vec![EngineEvent::NodeHovered(Some("N".to_string()))]);
        assert!(matches!(enter.commands[0], Command::ShowTooltip { .. }));
        assert_eq!(pointer.hovered(), Some("N"));

        let within = pointer.handle(PointerEvent::Move(Point::new(3.0, 2.0)), &t, hit);
        assert!(within.events.is_empty());

        let out = pointer.handle(PointerEvent::Move(Point::new(30.0, 2.0)), &t, hit);
        assert_eq!(out.commands, vec![Command::HideTooltip]);
        assert_eq!(out.events, vec![EngineEvent::NodeHovered(None)]);

        let idle = pointer.handle(PointerEvent::Move(Point::new(31.0, 2.0)), &t, hit);
        assert_eq!(idle, PointerOutcome::default());
    }

    #[test]
    fn leaving_mid_drag_releases_the_node() {
        let mut pointer = controller();
        let t = ViewTransform::IDENTITY;

        pointer.handle(PointerEvent::Down(Point::new(5.0, 5.0)), &t, hit);
        let leave = pointer.handle(PointerEvent::Leave, &t, hit);

        assert_eq!(
            leave.commands,
            vec![
                Command::Unpin {
                    id: "N".to_string()
                },
                Command::ReleaseEnergy
            ]
        );
        assert!(!pointer.is_dragging());
    }

    #[test]
    fn wheel_up_zooms_in() {
        let mut pointer = controller();
        let outcome = pointer.handle(
            PointerEvent::Wheel {
                position: Point::new(1.0, 1.0),
                delta_y: -500.0,
            },
            &ViewTransform::IDENTITY,
            hit,
        );

        match outcome.commands.as_slice() {
            [Command::Zoom { anchor, factor }] => {
                assert_eq!(*anchor, Point::new(1.0, 1.0));
                assert!((factor - 2.0).abs() < 1e-12);
            },
            other => panic!("unexpected commands: {:?}", other),
        }
    }
}
