//! The compiled-in menu catalog for the Xiaomi 13T.
//!
//! Script and executable paths are relative to the configured base
//! directory, mirroring the payload layout shipped next to the binary.

use std::path::PathBuf;

use super::model::{Action, MenuNode};

const HYPEROS_1_VERSIONS: [&str; 6] = [
    "HyperOS 1.0.3.0.UMFMIXM",
    "HyperOS 1.0.4.0.UMFMIXM",
    "HyperOS 1.0.5.0.UMFMIXM",
    "HyperOS 1.0.6.0.UMFMIXM",
    "HyperOS 1.0.9.0.UMFMIXM",
    "HyperOS 1.0.10.0.UMFMIXM",
];

const HYPEROS_2_VERSIONS: [&str; 4] = [
    "HyperOS 2.0.2.0.VMFMIXM",
    "HyperOS 2.0.3.0.VMFMIXM",
    "HyperOS 2.0.103.0.VMFMIXM",
    "HyperOS 2.0.104.0.VMFMIXM",
];

/// Build the full menu tree. Called once at startup.
pub fn main_menu() -> MenuNode {
    MenuNode::branch(
        "Main menu",
        vec![
            MenuNode::branch(
                "Firmware flashing",
                vec![
                    boot_images(),
                    MenuNode::branch(
                        "Official firmware install",
                        vec![script_leaf(
                            "HyperOS 2.0.103.0 EEA",
                            "flash/official/hyperos-2.0.103.0-eea.sh",
                        )],
                    ),
                    MenuNode::branch(
                        "Custom recovery",
                        vec![script_leaf("OrangeFox", "flash/recovery/orangefox.sh")],
                    ),
                    MenuNode::branch(
                        "Fastboot firmware tool",
                        vec![exe_leaf("FastbootTool", "flash/fastboot/FastbootTool")],
                    ),
                ],
            ),
            MenuNode::branch(
                "Bootloader unlock",
                vec![
                    exe_leaf("Mi Unlock", "unlock/miflash_unlock"),
                    exe_leaf("Driver install", "unlock/driver_install"),
                    exe_leaf("Driver install (64-bit)", "unlock/driver_install_64"),
                ],
            ),
            MenuNode::branch(
                "Help & info",
                vec![
                    MenuNode::leaf(
                        "Project repository",
                        Action::OpenUrl("https://github.com/example/repo".to_string()),
                    ),
                    MenuNode::leaf(
                        "Documentation",
                        Action::ShowMessage("Documentation: https://docs.example.com".to_string()),
                    ),
                    MenuNode::leaf(
                        "Support",
                        Action::ShowMessage("Support: https://support.example.com".to_string()),
                    ),
                ],
            ),
        ],
    )
}

/// Boot image flashing: one submenu per HyperOS release, each offering
/// the stock image and the Magisk-patched one.
fn boot_images() -> MenuNode {
    let families = [
        ("HyperOS 1", "hyperos-1", &HYPEROS_1_VERSIONS[..]),
        ("HyperOS 2", "hyperos-2", &HYPEROS_2_VERSIONS[..]),
    ];

    let children = families
        .into_iter()
        .map(|(family, family_dir, versions)| {
            MenuNode::branch(
                family,
                versions
                    .iter()
                    .map(|version| boot_pair(family_dir, version))
                    .collect(),
            )
        })
        .collect();

    MenuNode::branch("Boot image (original / Magisk)", children)
}

fn boot_pair(family_dir: &str, version: &str) -> MenuNode {
    let dir = format!("flash/boot/{family_dir}/{version}");
    MenuNode::branch(
        version,
        vec![
            script_leaf("Original", format!("{dir}/original.sh")),
            script_leaf("Magisk", format!("{dir}/magisk.sh")),
        ],
    )
}

fn script_leaf(name: &str, path: impl Into<PathBuf>) -> MenuNode {
    MenuNode::leaf(name, Action::RunScript(path.into()))
}

fn exe_leaf(name: &str, path: impl Into<PathBuf>) -> MenuNode {
    MenuNode::leaf(name, Action::RunExecutable(path.into()))
}
