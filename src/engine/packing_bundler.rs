// ==========================================
// 주문 데이터 정제 - 包装分组
// ==========================================
// 职责: 台账顺序中同一收件人的连续行合并为一个包装单位
// 红线:
//   - 只合并相邻行,不跨行合并同名收件人
//   - 全部分组按顺序拼接 = 原台账顺序
// ==========================================

use crate::domain::{OrderLine, PackingBundle, PackingRow};
use tracing::debug;

pub struct PackingBundler;

impl PackingBundler {
    /// 按 sequence_index 排序后切分连续收件人分组（编号从 1 开始）
    pub fn bundle(lines: &[OrderLine]) -> Vec<PackingBundle> {
        let mut ordered: Vec<&OrderLine> = lines.iter().collect();
        ordered.sort_by_key(|line| line.sequence_index);

        let mut bundles: Vec<PackingBundle> = Vec::new();
        for line in ordered {
            let continues = bundles
                .last()
                .and_then(|bundle| bundle.lines.last())
                .map(|prev| prev.recipient_name == line.recipient_name)
                .unwrap_or(false);

            match bundles.last_mut() {
                Some(current) if continues => current.lines.push(line.clone()),
                _ => {
                    let bundle_id = bundles.len() + 1;
                    bundles.push(PackingBundle {
                        bundle_id,
                        lines: vec![line.clone()],
                    });
                }
            }
        }

        debug!(lines = lines.len(), bundles = bundles.len(), "包装分组完成");
        bundles
    }

    /// 展开为包装清单行（分组首行带编号,后续行为空）
    pub fn packing_rows(bundles: &[PackingBundle]) -> Vec<PackingRow> {
        bundles
            .iter()
            .flat_map(|bundle| {
                bundle.lines.iter().enumerate().map(move |(pos, line)| PackingRow {
                    bundle_no: (pos == 0).then_some(bundle.bundle_id),
                    item_name: line.item_name.clone(),
                    quantity: line.quantity,
                    recipient_name: line.recipient_name.clone(),
                    channel: line.channel.label().to_string(),
                })
            })
            .collect()
    }
}
