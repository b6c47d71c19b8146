/// 课程内容树中的节点
///
/// 内容树由外部提供，这里只需要缓存用到的几个属性。
pub trait ModuleDescriptor {
    /// 模块自身的 location，作为默认的状态键
    fn location_url(&self) -> String;

    /// 是否为学生保存状态
    fn stores_state(&self) -> bool;

    /// 与其他模块实例共享的状态键
    fn shared_state_key(&self) -> Option<&str> {
        None
    }

    fn children(&self) -> Vec<&Self>;
}

/// 从 `root` 开始收集节点，最多向下 `depth` 层（None 表示不限）
///
/// 被 `filter` 排除的节点不收集，但仍会继续遍历它的子节点。
/// 结果按先序排列，子节点保持声明顺序。
pub fn collect_descendants<'a, D, F>(root: &'a D, depth: Option<usize>, filter: F) -> Vec<&'a D>
where
    D: ModuleDescriptor,
    F: Fn(&D) -> bool,
{
    let mut collected = Vec::new();
    let mut stack = vec![(root, depth)];

    while let Some((node, remaining)) = stack.pop() {
        if filter(node) {
            collected.push(node);
        }

        if remaining.is_none_or(|levels| levels > 0) {
            let next = remaining.map(|levels| levels - 1);
            // 逆序入栈以保持先序
            for child in node.children().into_iter().rev() {
                stack.push((child, next));
            }
        }
    }

    collected
}
