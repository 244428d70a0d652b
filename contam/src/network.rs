/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::Float;
use model::{Boundary, Model, Space, SubSurface, Surface, SurfaceTrait, ThermalZone};
use std::collections::HashSet;
use std::sync::Arc;

/// Walks the surfaces of a [`Model`], offering each connection between a
/// thermal zone and the outside (or between two thermal zones) to a
/// callback. Implementors decide what to do with each of them; the
/// callbacks return `false` when something went wrong.
///
/// Surfaces whose boundary is [`Boundary::Ground`] or [`Boundary::Adiabatic`]
/// are not offered, nor are surfaces separating two spaces of the same
/// thermal zone.
pub trait SurfaceNetworkBuilder {
    /// A surface leading outdoors
    fn link_exterior_surface(
        &mut self,
        _zone: &ThermalZone,
        _space: &Space,
        _surface: &Surface,
    ) -> bool {
        true
    }

    /// A surface separating two thermal zones. Each pair is offered once.
    fn link_interior_surface(
        &mut self,
        _zone: &ThermalZone,
        _space: &Space,
        _surface: &Surface,
        _adjacent_surface: &Surface,
        _adjacent_space: &Space,
        _adjacent_zone: &ThermalZone,
    ) -> bool {
        true
    }

    /// A window or door on a surface leading outdoors
    fn link_exterior_sub_surface(
        &mut self,
        _zone: &ThermalZone,
        _space: &Space,
        _surface: &Surface,
        _sub_surface: &SubSurface,
    ) -> bool {
        true
    }

    /// A window or door on a surface separating two thermal zones
    #[allow(clippy::too_many_arguments)]
    fn link_interior_sub_surface(
        &mut self,
        _zone: &ThermalZone,
        _space: &Space,
        _surface: &Surface,
        _sub_surface: &SubSurface,
        _adjacent_sub_surface: &SubSurface,
        _adjacent_surface: &Surface,
        _adjacent_space: &Space,
        _adjacent_zone: &ThermalZone,
    ) -> bool {
        true
    }

    /// Called once for every surface in the model, before it is offered (or
    /// skipped)
    fn visit_surface(&mut self, _surface: &Surface) {}

    /// Reports something odd in the model
    fn warn(&mut self, msg: &str) {
        model::print_warning("SurfaceNetworkBuilder", msg)
    }

    /// Offers every surface of `model` to the callbacks. Returns `false` if
    /// any of them did.
    fn build(&mut self, model: &Model) -> bool {
        let mut ok = true;
        let mut used: HashSet<&str> = HashSet::new();

        for surface in model.surfaces.iter() {
            self.visit_surface(surface);
            if used.contains(surface.name.as_str()) {
                continue;
            }
            let (space, zone) = match zone_of(model, &surface.space) {
                Ok(v) => v,
                Err(e) => {
                    self.warn(&format!("Surface '{}' not linked: {}", surface.name, e));
                    continue;
                }
            };

            match &surface.boundary {
                Boundary::Ground | Boundary::Adiabatic => continue,
                Boundary::Outdoors => {
                    if !self.link_exterior_surface(&zone, &space, surface) {
                        ok = false;
                    }
                    for sub in model.sub_surfaces_in_surface(&surface.name) {
                        if !self.link_exterior_sub_surface(&zone, &space, surface, &sub) {
                            ok = false;
                        }
                    }
                }
                Boundary::Surface {
                    surface: adjacent_name,
                } => {
                    let adjacent = match model.get_surface(adjacent_name) {
                        Ok(s) => s,
                        Err(e) => {
                            self.warn(&format!(
                                "Unable to find the surface adjacent to '{}': {}",
                                surface.name, e
                            ));
                            continue;
                        }
                    };
                    let (adjacent_space, adjacent_zone) = match zone_of(model, &adjacent.space) {
                        Ok(v) => v,
                        Err(e) => {
                            self.warn(&format!(
                                "Surface '{}' not linked to '{}': {}",
                                surface.name, adjacent.name, e
                            ));
                            continue;
                        }
                    };
                    // A reciprocal partner is taken care of with this one.
                    // Otherwise it is still offered, following its own boundary.
                    if adjacent.boundary.adjacent_surface() == Some(&surface.name) {
                        if let Some(s) = model.surfaces.iter().find(|s| s.name == adjacent.name) {
                            used.insert(s.name.as_str());
                        }
                    } else {
                        self.warn(&format!(
                            "Surface '{}' points to '{}', which does not point back",
                            surface.name, adjacent.name
                        ));
                    }
                    if zone.name == adjacent_zone.name {
                        continue;
                    }
                    if !self.link_interior_surface(
                        &zone,
                        &space,
                        surface,
                        &adjacent,
                        &adjacent_space,
                        &adjacent_zone,
                    ) {
                        ok = false;
                    }
                    for sub in model.sub_surfaces_in_surface(&surface.name) {
                        let adjacent_sub = match sub
                            .adjacent_sub_surface
                            .as_ref()
                            .map(|name| model.get_sub_surface(name))
                        {
                            Some(Ok(s)) => s,
                            _ => {
                                self.warn(&format!(
                                    "Sub-surface '{}' is in an interior surface but has no adjacent sub-surface",
                                    sub.name
                                ));
                                continue;
                            }
                        };
                        if !self.link_interior_sub_surface(
                            &zone,
                            &space,
                            surface,
                            &sub,
                            &adjacent_sub,
                            &adjacent,
                            &adjacent_space,
                            &adjacent_zone,
                        ) {
                            ok = false;
                        }
                    }
                }
            }
        }
        ok
    }
}

/// The space called `space_name` and its thermal zone
fn zone_of(model: &Model, space_name: &str) -> Result<(Arc<Space>, Arc<ThermalZone>), String> {
    let space = model.get_space(space_name)?;
    let zone_name = space
        .thermal_zone
        .as_ref()
        .ok_or_else(|| format!("Space '{}' is not in a thermal zone", space.name))?;
    let zone = model.get_thermal_zone(zone_name)?;
    Ok((space, zone))
}

/// The kind of connection between zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A surface leading outdoors
    ExteriorSurface,
    /// A surface between two thermal zones
    InteriorSurface,
    /// A window or door leading outdoors
    ExteriorSubSurface,
    /// A window or door between two thermal zones
    InteriorSubSurface,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ExteriorSurface => "exterior surface",
            Self::InteriorSurface => "interior surface",
            Self::ExteriorSubSurface => "exterior sub-surface",
            Self::InteriorSubSurface => "interior sub-surface",
        };
        write!(f, "{}", s)
    }
}

/// A connection found by a [`NetworkReport`]
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// What connects the zones
    pub kind: LinkKind,
    /// The name of the surface (or sub-surface)
    pub surface: String,
    /// The thermal zone on this side
    pub zone: String,
    /// The thermal zone on the other side, or `None` for the outside
    pub adjacent_zone: Option<String>,
    /// The area of the connection, in m2. For interior links, this is
    /// the average of both sides.
    pub area: Float,
}

/// A [`SurfaceNetworkBuilder`] that lists the links it is offered
///
/// ```
/// use contam::{NetworkReport, SurfaceNetworkBuilder, LinkKind};
///
/// let model = test_models::four_zone_demo().unwrap();
/// let mut report = NetworkReport::default();
/// assert!(report.build(&model));
/// assert_eq!(report.count(LinkKind::InteriorSurface), 4);
/// assert_eq!(report.count(LinkKind::InteriorSubSurface), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkReport {
    /// The links, in the order they were found
    pub links: Vec<Link>,
    /// Warnings emitted while building
    pub warnings: Vec<String>,
}

impl NetworkReport {
    /// Builds a report of `model`
    pub fn new(model: &Model) -> Self {
        let mut ret = Self::default();
        ret.build(model);
        ret
    }

    /// The number of links of a certain kind
    pub fn count(&self, kind: LinkKind) -> usize {
        self.links.iter().filter(|l| l.kind == kind).count()
    }

    /// The sum of the areas of the links of a certain kind
    pub fn area(&self, kind: LinkKind) -> Float {
        self.links
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.area)
            .sum()
    }

    fn push(&mut self, kind: LinkKind, surface: &str, zone: &ThermalZone, adjacent_zone: Option<&ThermalZone>, area: Float) {
        self.links.push(Link {
            kind,
            surface: surface.to_string(),
            zone: zone.name.clone(),
            adjacent_zone: adjacent_zone.map(|z| z.name.clone()),
            area,
        })
    }
}

impl SurfaceNetworkBuilder for NetworkReport {
    fn link_exterior_surface(&mut self, zone: &ThermalZone, _space: &Space, surface: &Surface) -> bool {
        self.push(LinkKind::ExteriorSurface, &surface.name, zone, None, surface.gross_area());
        true
    }

    fn link_interior_surface(
        &mut self,
        zone: &ThermalZone,
        _space: &Space,
        surface: &Surface,
        adjacent_surface: &Surface,
        _adjacent_space: &Space,
        adjacent_zone: &ThermalZone,
    ) -> bool {
        let area = 0.5 * (surface.gross_area() + adjacent_surface.gross_area());
        self.push(LinkKind::InteriorSurface, &surface.name, zone, Some(adjacent_zone), area);
        true
    }

    fn link_exterior_sub_surface(
        &mut self,
        zone: &ThermalZone,
        _space: &Space,
        _surface: &Surface,
        sub_surface: &SubSurface,
    ) -> bool {
        self.push(LinkKind::ExteriorSubSurface, &sub_surface.name, zone, None, sub_surface.gross_area());
        true
    }

    fn link_interior_sub_surface(
        &mut self,
        zone: &ThermalZone,
        _space: &Space,
        _surface: &Surface,
        sub_surface: &SubSurface,
        adjacent_sub_surface: &SubSurface,
        _adjacent_surface: &Surface,
        _adjacent_space: &Space,
        adjacent_zone: &ThermalZone,
    ) -> bool {
        let area = 0.5 * (sub_surface.gross_area() + adjacent_sub_surface.gross_area());
        self.push(LinkKind::InteriorSubSurface, &sub_surface.name, zone, Some(adjacent_zone), area);
        true
    }

    fn warn(&mut self, msg: &str) {
        model::print_warning("NetworkReport", msg);
        self.warnings.push(msg.to_string())
    }
}

impl std::fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for l in self.links.iter() {
            let other = l.adjacent_zone.as_deref().unwrap_or("outside");
            writeln!(
                f,
                "{:<22} {:<28} {} -> {} ({:.2} m2)",
                l.kind.to_string(),
                l.surface,
                l.zone,
                other,
                l.area
            )?;
        }
        for w in self.warnings.iter() {
            writeln!(f, "warning: {}", w)?;
        }
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    /// Only counts, and fails on interior links
    #[derive(Default)]
    struct Counter {
        visited: usize,
        exterior: usize,
        interior: usize,
    }

    impl SurfaceNetworkBuilder for Counter {
        fn visit_surface(&mut self, _: &Surface) {
            self.visited += 1;
        }


        fn link_exterior_surface(&mut self, _: &ThermalZone, _: &Space, _: &Surface) -> bool {
            self.exterior += 1;
            true
        }

        fn link_interior_surface(
            &mut self,
            _: &ThermalZone,
            _: &Space,
            _: &Surface,
            _: &Surface,
            _: &Space,
            _: &ThermalZone,
        ) -> bool {
            self.interior += 1;
            false
        }
    }

    #[test]
    fn test_single_zone() -> Result<(), String> {
        let model = test_models::four_space_demo()?;
        let report = NetworkReport::new(&model);

        // 8 exterior walls and 4 roofs; floors are on the ground
        assert_eq!(report.count(LinkKind::ExteriorSurface), 12);
        // All spaces are in the same zone
        assert_eq!(report.count(LinkKind::InteriorSurface), 0);
        assert_eq!(report.count(LinkKind::ExteriorSubSurface), 2);
        assert!((report.area(LinkKind::ExteriorSurface) - (8. * 30. + 4. * 100.)).abs() < 1e-6);
        assert!(report.warnings.is_empty());
        assert!(report.to_string().contains("Door 1"));
        Ok(())
    }

    #[test]
    fn test_four_zones() -> Result<(), String> {
        let model = test_models::four_zone_demo()?;
        let report = NetworkReport::new(&model);
        assert_eq!(report.count(LinkKind::ExteriorSurface), 12);
        assert_eq!(report.count(LinkKind::InteriorSurface), 4);
        assert_eq!(report.count(LinkKind::ExteriorSubSurface), 2);
        assert_eq!(report.count(LinkKind::InteriorSubSurface), 1);

        // Each pair is offered only once
        let mut seen = HashSet::new();
        for l in report.links.iter().filter(|l| l.kind == LinkKind::InteriorSurface) {
            let mut pair = [l.zone.clone(), l.adjacent_zone.clone().unwrap_or_default()];
            pair.sort();
            assert!(seen.insert(pair));
        }
        Ok(())
    }

    #[test]
    fn test_failing_callback() -> Result<(), String> {
        let model = test_models::four_zone_demo()?;
        let mut counter = Counter::default();
        assert!(!counter.build(&model));
        assert_eq!(counter.exterior, 12);
        assert_eq!(counter.interior, 4);
        // Partners and floors are visited too
        assert_eq!(counter.visited, model.surfaces.len());

        let model = test_models::four_space_demo()?;
        let mut counter = Counter::default();
        assert!(counter.build(&model));
        Ok(())
    }

    #[test]
    fn test_unzoned_space() -> Result<(), String> {
        let mut model = test_models::four_space_demo()?;
        let s = model
            .spaces
            .iter_mut()
            .find(|s| s.name == "Space 4")
            .ok_or("no space 4")?;
        Arc::make_mut(s).thermal_zone = None;

        let report = NetworkReport::new(&model);
        // The 6 surfaces of Space 4, plus the walls of Spaces 2 and 3 facing it
        assert_eq!(report.warnings.len(), 8);
        Ok(())
    }

    #[test]
    fn test_one_sided_adjacency() -> Result<(), String> {
        let mut model = test_models::get_grid_building(&test_models::GridBuildingOptions {
            nx: 2,
            ny: 1,
            zone_per_space: true,
            match_surfaces: false,
            ..Default::default()
        })?;
        let report = NetworkReport::new(&model);
        assert_eq!(report.count(LinkKind::ExteriorSurface), 10);

        // Space 2 Wall 1 still faces the outside
        model.set_surface_boundary(
            "Space 1 Wall 1",
            Boundary::Surface {
                surface: "Space 2 Wall 1".into(),
            },
        )?;
        let report = NetworkReport::new(&model);
        assert_eq!(report.count(LinkKind::InteriorSurface), 1);
        assert_eq!(report.count(LinkKind::ExteriorSurface), 9);
        assert!(report
            .links
            .iter()
            .any(|l| l.kind == LinkKind::ExteriorSurface && l.surface == "Space 2 Wall 1"));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("does not point back"));
        Ok(())
    }
}
