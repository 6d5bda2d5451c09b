use crate::models::{Brand, BrandDirectory, Portal, PortalInherit};

/// Mark each portal field without a local value as inherited. An empty
/// string is not a value.
///
/// Root brands never inherit. Nothing is copied from the parent here; the
/// child's own portal fields stay absent.
pub fn inherit_flags(has_parent: bool, portal: &Portal) -> PortalInherit {
    if !has_parent {
        return PortalInherit::default();
    }

    PortalInherit {
        name: is_unset(&portal.name),
        description: is_unset(&portal.description),
        website: is_unset(&portal.website),
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Portal values to emit for a brand.
///
/// Inherited fields take the direct parent's own value. Only one hop is
/// made: a parent that itself inherits contributes nothing for that field,
/// and a parent missing from the directory contributes nothing at all.
pub fn resolve_portal(brand: &Brand, directory: &BrandDirectory) -> Portal {
    let Some(parent_id) = brand.parent_id.as_deref() else {
        return brand.portal.clone();
    };

    let parent = directory.get(parent_id).map(|p| &p.portal);
    let inherit = &brand.portal_inherit;

    Portal {
        name: pick(inherit.name, &brand.portal.name, parent.map(|p| &p.name)),
        description: pick(
            inherit.description,
            &brand.portal.description,
            parent.map(|p| &p.description),
        ),
        website: pick(inherit.website, &brand.portal.website, parent.map(|p| &p.website)),
    }
}

fn pick(inherited: bool, local: &Option<String>, parent: Option<&Option<String>>) -> Option<String> {
    if inherited {
        parent.cloned().flatten()
    } else {
        local.clone()
    }
}
