//! Sign-up links
//!
//! Registration happens on external forms; the page only points at them.

/// The two audiences the event registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupForm {
    /// Musicians, poets, performers
    Artists,
    /// Crafts, food and creative-product stands
    Exhibitors,
}

impl SignupForm {
    pub const ALL: [SignupForm; 2] = [SignupForm::Artists, SignupForm::Exhibitors];

    pub fn url(&self) -> &'static str {
        match self {
            SignupForm::Artists => {
                "https://docs.google.com/forms/d/e/1FAIpQLSf_scIbk41ISXkwvU4K25msQ1F18vukadyW8sH7dFGU2ezc7A/viewform"
            }
            SignupForm::Exhibitors => {
                "https://docs.google.com/forms/d/e/1FAIpQLSdvd9jxZVE3J76r0s2v02NItW7WZ2gncHkYFsgm9gcqiGFYfg/viewform"
            }
        }
    }

    /// Id of the anchor element that opens this form
    pub fn anchor_id(&self) -> &'static str {
        match self {
            SignupForm::Artists => "signup-artists",
            SignupForm::Exhibitors => "signup-exhibitors",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignupForm::Artists => "Inscrição para Artistas",
            SignupForm::Exhibitors => "Inscrição para Expositores",
        }
    }
}

/// Attributes that make an anchor open the form in a new, unlinked tab
pub fn anchor_attributes(form: SignupForm) -> [(&'static str, &'static str); 3] {
    [
        ("href", form.url()),
        ("target", "_blank"),
        ("rel", "noopener noreferrer"),
    ]
}

/// Point every sign-up anchor on the page at its form. Returns how many were found.
#[cfg(target_arch = "wasm32")]
pub fn wire_signup_links(document: &web_sys::Document) -> crate::HeaderResult<usize> {
    let mut wired = 0;
    for form in SignupForm::ALL {
        let Some(anchor) = document.get_element_by_id(form.anchor_id()) else {
            log::debug!("No #{} anchor on page", form.anchor_id());
            continue;
        };
        for (name, value) in anchor_attributes(form) {
            anchor.set_attribute(name, value)?;
        }
        if anchor.text_content().unwrap_or_default().trim().is_empty() {
            anchor.set_text_content(Some(form.label()));
        }
        wired += 1;
    }
    Ok(wired)
}
