use std::ops::*;

use super::Vec2;

impl<T> Neg for Vec2<T>
where
    T: Neg<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn neg(self) -> Vec2<T> {
        Vec2::<T> {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T> Add for Vec2<T>
where
    T: Add<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn add(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T> AddAssign for Vec2<T>
where
    T: AddAssign + Copy,
{
    fn add_assign(&mut self, other: Vec2<T>) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl<T> Sub for Vec2<T>
where
    T: Sub<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn sub(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> Mul<T> for Vec2<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Vec2<T>;

    fn mul(self, other: T) -> Vec2<T> {
        Vec2::<T> {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl Vec2<f32> {
    pub const fn new(x: f32, y: f32) -> Vec2<f32> {
        Vec2::<f32> { x, y }
    }

    pub const fn zero() -> Vec2<f32> {
        Vec2::<f32> { x: 0.0, y: 0.0 }
    }

    pub fn mag(self) -> f32 {
        self.mag_sq().sqrt()
    }

    pub fn mag_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn dist(self, other: Vec2<f32>) -> f32 {
        (self - other).mag()
    }

    pub fn to_p2(self) -> Vec2<i32> {
        Vec2::<i32> {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
        }
    }
}
